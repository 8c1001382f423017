use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{DashboardState, LoadingState, Page};
use crate::summary::Summary;
use crate::ui::{
    components::{empty_state, help_bar, screen_title, stat_card},
    layouts, theme, utils,
};

const CHART_HEIGHT: u16 = 12;

pub fn render(f: &mut Frame, state: &DashboardState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        Page::Dashboard,
        &state.dashboard_loading,
        Some(state.currency.code()),
    );
    render_content(f, content_area, state);

    let mut keys = vec![("j/k", "move"), ("c", "currency"), ("r", "refresh")];
    keys.extend_from_slice(help_bar::GLOBAL_KEYS);
    help_bar::render_help_bar(f, help_area, &keys);
}

fn render_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(summary) = state.summary else {
        match &state.dashboard_loading {
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Dashboard", error)
            }
            _ => empty_state::render_loading_state(f, area, "Dashboard", "Loading dashboard..."),
        }
        return;
    };

    let [cards_area, body_area, chart_area] = Layout::vertical([
        Constraint::Length(theme::SUMMARY_CARD_HEIGHT),
        Constraint::Min(6),
        Constraint::Length(CHART_HEIGHT),
    ])
    .areas(area);

    render_stat_cards(f, cards_area, state, &summary);

    let [recent_area, month_area] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
            .areas(body_area);
    render_recent_transactions(f, recent_area, state);
    render_this_month(f, month_area, state, &summary);
    render_category_chart(f, chart_area, state);
}

fn render_stat_cards(f: &mut Frame, area: Rect, state: &DashboardState, summary: &Summary) {
    let cards = layouts::equal_columns(area, 4);
    let currency = state.currency;

    stat_card::render_stat_card(
        f,
        cards[0],
        "Total Balance",
        &currency.format(Some(summary.balance)),
        theme::amount_color(summary.balance),
    );
    stat_card::render_stat_card(
        f,
        cards[1],
        "Total Accounts",
        &summary.account_count.to_string(),
        theme::COLOR_TITLE,
    );
    stat_card::render_stat_card(
        f,
        cards[2],
        "Income",
        &currency.format(Some(summary.income)),
        theme::COLOR_POSITIVE,
    );
    stat_card::render_stat_card(
        f,
        cards[3],
        "Expenses",
        &currency.format(Some(summary.expenses)),
        theme::COLOR_NEGATIVE,
    );
}

fn render_recent_transactions(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.transactions.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Recent Transactions",
            "No transactions yet",
            Some("Add one from the Transactions page (2)"),
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Description"),
        Cell::from("Category"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = state
        .transactions
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(utils::fmt_date(t.date.as_deref())),
                Cell::from(t.description.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(t.category.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(Text::from(utils::amount_span(t, state.currency)).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Recent Transactions ({})", state.transactions.len())),
    )
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn render_this_month(f: &mut Frame, area: Rect, state: &DashboardState, summary: &Summary) {
    let currency = state.currency;
    let net = summary.net();

    let line = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), theme::help_text_style()),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let lines = vec![
        Line::from(""),
        line(
            "Income",
            currency.format(Some(summary.income)),
            theme::COLOR_POSITIVE,
        ),
        line(
            "Expenses",
            currency.format(Some(summary.expenses)),
            theme::COLOR_NEGATIVE,
        ),
        line("Net", currency.format(Some(net)), theme::amount_color(net)),
    ];

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("This Month"));
    f.render_widget(panel, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.category_breakdown.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Spending by Category",
            "No categorized spending yet",
            None,
        );
        return;
    }

    let currency = state.currency;
    let bars: Vec<Bar> = state
        .category_breakdown
        .iter()
        .map(|slice| {
            Bar::default()
                .value(slice.value.max(0.0).round() as u64)
                .label(Line::from(utils::truncate(&slice.name, 10)))
                .text_value(currency.format(Some(slice.value)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Spending by Category"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme::COLOR_CHART_BAR))
        .value_style(theme::header_style());

    f.render_widget(chart, area);
}
