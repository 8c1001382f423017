use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{InputMode, LoadingState, Page, TransactionsState};
use crate::ui::{
    components::{empty_state, filter_input, forms, help_bar, screen_title, stat_card},
    layouts, theme, utils,
};
use finboard_api::endpoints::transactions::Transaction;

pub fn render(f: &mut Frame, state: &TransactionsState) {
    let currency = Some(state.currency.code());

    if state.input_mode == InputMode::Filter {
        let (title_area, filter_area, content_area, help_area) =
            layouts::screen_layout_with_filter(f.area());

        screen_title::render_screen_title(
            f,
            title_area,
            Page::Transactions,
            &state.transactions_loading,
            currency,
        );
        filter_input::render_filter_input(f, filter_area, &state.filter_query);
        render_content(f, content_area, state);
        render_help(f, help_area, state);
    } else {
        let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

        screen_title::render_screen_title(
            f,
            title_area,
            Page::Transactions,
            &state.transactions_loading,
            currency,
        );
        render_content(f, content_area, state);
        render_help(f, help_area, state);
    }

    match state.input_mode {
        InputMode::TransactionForm => {
            if let Some(ref form) = state.form {
                let account = state
                    .selected_account()
                    .map(utils::account_label)
                    .unwrap_or_default();
                forms::render_transaction_form(f, form, &account);
            }
        }
        InputMode::CsvImport => forms::render_csv_prompt(f, &state.csv_path),
        _ => {}
    }
}

fn render_help(f: &mut Frame, area: Rect, state: &TransactionsState) {
    let mut keys = if state.input_mode == InputMode::Filter {
        vec![("Enter", "keep filter"), ("Esc", "clear filter")]
    } else {
        vec![
            ("[/]", "account"),
            ("n", "add"),
            ("i", "import CSV"),
            ("/", "filter"),
            ("c", "currency"),
            ("r", "refresh"),
        ]
    };
    keys.extend_from_slice(help_bar::GLOBAL_KEYS);
    help_bar::render_help_bar(f, area, &keys);
}

fn render_content(f: &mut Frame, area: Rect, state: &TransactionsState) {
    if state.accounts.is_empty() {
        match &state.transactions_loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Status", "Loading accounts...")
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Transactions", error)
            }
            _ => empty_state::render_empty_state(
                f,
                area,
                "Transactions",
                "No accounts found",
                Some("Transactions belong to an account; create one in the backend first"),
            ),
        }
        return;
    }

    let [account_area, cards_area, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(theme::SUMMARY_CARD_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area);

    render_account_selector(f, account_area, state);
    render_stats(f, cards_area, state);

    if state.transactions_loading.is_loading() && state.transactions.is_empty() {
        empty_state::render_loading_state(f, table_area, "Status", "Loading transactions...");
        return;
    }

    let filtered = state.filtered_transactions();

    if filtered.is_empty() {
        let message = if !state.filter_query.is_empty() {
            "No matching transactions"
        } else {
            "No transactions for this account"
        };
        empty_state::render_empty_state(
            f,
            table_area,
            "Transactions",
            message,
            Some("n: add, i: import CSV"),
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Description"),
        Cell::from("Category"),
        Cell::from("Type"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = filtered
        .iter()
        .map(|t| build_transaction_row(t, state))
        .collect();

    let title = if !state.filter_query.is_empty() {
        format!("Transactions ({} filtered)", filtered.len())
    } else {
        "Transactions".to_string()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Length(6),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, table_area, &mut state.table_state.borrow_mut());
}

fn build_transaction_row(transaction: &Transaction, state: &TransactionsState) -> Row<'static> {
    Row::new(vec![
        Cell::from(utils::fmt_date(transaction.date.as_deref())),
        Cell::from(
            transaction
                .description
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::from(
            transaction
                .category
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::from(Span::styled(
            transaction.txn_type.to_string(),
            Style::default().fg(theme::txn_type_color(transaction.txn_type)),
        )),
        Cell::from(Text::from(utils::amount_span(transaction, state.currency)).right_aligned()),
    ])
}

/// `< HDFC · Savings  (2/3) >`, arrows only where there is a neighbour
fn render_account_selector(f: &mut Frame, area: Rect, state: &TransactionsState) {
    let Some(account) = state.selected_account() else {
        return;
    };
    let position = state
        .accounts
        .iter()
        .position(|a| a.id == account.id)
        .map(|i| i + 1)
        .unwrap_or(0);

    let arrow = |present: bool, glyph: &'static str| {
        if present {
            Span::styled(glyph, theme::header_style())
        } else {
            Span::raw(" ")
        }
    };

    let line = Line::from(vec![
        arrow(state.adjacent_account_id(false).is_some(), "< "),
        Span::styled(utils::account_label(account), theme::title_style()),
        Span::styled(
            format!("  ({}/{})  ", position, state.accounts.len()),
            theme::help_text_style(),
        ),
        Span::styled(
            state.currency.format(Some(account.balance)),
            Style::default().fg(theme::amount_color(account.balance)),
        ),
        arrow(state.adjacent_account_id(true).is_some(), " >"),
    ]);

    f.render_widget(line.centered(), area);
}

fn render_stats(f: &mut Frame, area: Rect, state: &TransactionsState) {
    let stats = state.stats();
    let cards = layouts::equal_columns(area, 3);

    stat_card::render_stat_card(
        f,
        cards[0],
        "Transactions",
        &state.transactions.len().to_string(),
        theme::COLOR_TITLE,
    );
    stat_card::render_stat_card(
        f,
        cards[1],
        "Income",
        &state.currency.format(Some(stats.income)),
        theme::COLOR_POSITIVE,
    );
    stat_card::render_stat_card(
        f,
        cards[2],
        "Expenses",
        &state.currency.format(Some(stats.expenses)),
        theme::COLOR_NEGATIVE,
    );
}
