use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use crate::currency::Currency;
use crate::state::{BudgetsState, InputMode, LoadingState, Page};
use crate::ui::{
    components::{budget_card, empty_state, forms, help_bar, screen_title},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &BudgetsState, currency: Currency) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, Page::Budgets, &state.budgets_loading, None);
    render_content(f, content_area, state, currency);

    let mut keys = vec![("n", "new"), ("d", "delete"), ("r", "refresh")];
    keys.extend_from_slice(help_bar::GLOBAL_KEYS);
    help_bar::render_help_bar(f, help_area, &keys);

    if state.input_mode == InputMode::BudgetForm {
        if let Some(ref form) = state.form {
            forms::render_budget_form(f, form);
        }
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &BudgetsState, currency: Currency) {
    if state.budgets.is_empty() {
        match &state.budgets_loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Status", "Loading budgets...")
            }
            LoadingState::Error(error) => empty_state::render_error_state(f, area, "Budgets", error),
            _ => empty_state::render_empty_state(
                f,
                area,
                "Budgets",
                "No budgets found",
                Some("Press n to add a monthly limit"),
            ),
        }
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Budgets ({})", state.budgets.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let per_page = (inner.height / theme::BUDGET_CARD_HEIGHT).max(1) as usize;
    let selected = state.table_state.borrow().selected().unwrap_or(0);
    let first = visible_start(selected, per_page, state.budgets.len());

    let visible = &state.budgets[first..(first + per_page).min(state.budgets.len())];
    let slots = Layout::vertical(vec![
        Constraint::Length(theme::BUDGET_CARD_HEIGHT);
        visible.len()
    ])
    .split(inner);

    for (offset, (budget, slot)) in visible.iter().zip(slots.iter()).enumerate() {
        budget_card::render_budget_card(f, *slot, budget, currency, first + offset == selected);
    }
}

/// First card index so the selected card stays on screen
fn visible_start(selected: usize, per_page: usize, total: usize) -> usize {
    if total <= per_page {
        0
    } else {
        selected
            .saturating_sub(per_page - 1)
            .min(total - per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_start_keeps_selection_on_screen() {
        assert_eq!(visible_start(0, 3, 2), 0);
        assert_eq!(visible_start(1, 3, 10), 0);
        assert_eq!(visible_start(5, 3, 10), 3);
        assert_eq!(visible_start(9, 3, 10), 7);
    }
}
