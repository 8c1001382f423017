use finboard_api::endpoints::budgets::Budget;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::currency::Currency;
use crate::summary::{warning_is_alert, BudgetProgress};
use crate::ui::theme;

/// One budget: gauge of spent against limit, then the figures and any warning
pub fn render_budget_card(
    f: &mut Frame,
    area: Rect,
    budget: &Budget,
    currency: Currency,
    selected: bool,
) {
    let spent = budget.spent_amount.unwrap_or(0.0);
    let progress = BudgetProgress::new(spent, budget.limit_amount);

    let border_style = if selected {
        theme::accent_border_style().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " {} ({:02}/{}) ",
            budget.category, budget.month, budget.year
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [gauge_area, detail_area, warning_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::gauge_color(progress.over_limit)))
        .percent(progress.percent_u16())
        .label(format!("{}%", progress.percent_u16()));
    f.render_widget(gauge, gauge_area);

    let detail = Line::from(vec![
        Span::raw("Spent "),
        Span::styled(
            currency.format(Some(spent)),
            Style::default().fg(theme::gauge_color(progress.over_limit)),
        ),
        Span::raw(" of "),
        Span::styled(
            currency.format(Some(budget.limit_amount)),
            theme::header_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(detail), detail_area);

    if let Some(warning) = budget.warning.as_deref().filter(|w| !w.is_empty()) {
        let style = theme::warning_style(warning_is_alert(warning));
        f.render_widget(Paragraph::new(Span::styled(warning, style)), warning_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn budget(spent: f64, warning: Option<&str>) -> Budget {
        Budget {
            id: 1,
            category: "Food".to_string(),
            limit_amount: 100.0,
            month: 1,
            year: 2025,
            spent_amount: Some(spent),
            warning: warning.map(str::to_string),
        }
    }

    /// Draw one card and return the colour of the first warning character
    fn warning_color(budget: &Budget) -> Color {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|f| render_budget_card(f, f.area(), budget, Currency::Inr, false))
            .unwrap();
        // Inside the border the warning is the third row
        terminal.backend().buffer()[(1, 3)].fg
    }

    #[test]
    fn test_exceeded_warning_is_red() {
        let budget = budget(150.0, Some("Budget exceeded by ₹50"));
        assert_eq!(warning_color(&budget), theme::COLOR_GAUGE_OVER);
    }

    #[test]
    fn test_other_warning_is_green() {
        let budget = budget(90.0, Some("Within budget"));
        assert_eq!(warning_color(&budget), theme::COLOR_GAUGE_OK);
    }
}
