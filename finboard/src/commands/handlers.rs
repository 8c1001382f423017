use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.is_ctrl_char('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 0: a blocking alert swallows everything until dismissed
    if state.alert.is_some() {
        return match key {
            Key::Enter | Key::Esc | Key::Char(' ') => Some(AppCommand::DismissAlert),
            _ => None,
        };
    }

    // Priority 1: modal forms and the CSV path prompt
    let form_open = match state.current_screen() {
        Screen::Transactions(s) => matches!(
            s.input_mode,
            InputMode::TransactionForm | InputMode::CsvImport
        ),
        Screen::Categories(s) => s.input_mode == InputMode::CategoryForm,
        Screen::Budgets(s) => s.input_mode == InputMode::BudgetForm,
        _ => false,
    };
    if form_open {
        return handle_form_keys(event);
    }

    // Priority 2: Delete confirmation popup
    if let Screen::Categories(categories_state) = state.current_screen() {
        if categories_state.input_mode == InputMode::DeleteConfirmation {
            return handle_delete_confirmation_keys(key);
        }
    }

    // Priority 3: Filter mode key handling
    if let Screen::Transactions(trans_state) = state.current_screen() {
        if trans_state.input_mode == InputMode::Filter {
            return match key {
                Key::Enter => Some(AppCommand::ExitFilterMode),
                Key::Backspace => Some(AppCommand::DeleteFilterChar),
                Key::Char(c) => Some(AppCommand::AppendFilterChar(c)),
                Key::Esc => Some(AppCommand::ClearFilter),
                _ => None,
            };
        }
    }

    // Priority 4: Check if we're currently showing the help popup
    // This must come before screen-specific Esc handling so help popup takes precedence
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 5: Screen-specific Esc handling (clear filter when not in filter mode)
    if let (Screen::Transactions(_), Key::Esc) = (state.current_screen(), key) {
        return Some(AppCommand::ClearFilter);
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'g' -> navigate to top of table
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            ('g', Key::Char('d')) => Some(AppCommand::SwitchPage(Page::Dashboard)),
            ('g', Key::Char('t')) => Some(AppCommand::SwitchPage(Page::Transactions)),
            ('g', Key::Char('c')) => Some(AppCommand::SwitchPage(Page::Categories)),
            ('g', Key::Char('b')) => Some(AppCommand::SwitchPage(Page::Budgets)),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Navigate to bottom: 'G' (Shift+g)
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Page switching
        (_, Key::Char(c @ '1'..='4')) => {
            let idx = c.to_digit(10)? as usize - 1;
            Some(AppCommand::SwitchPage(Page::ALL[idx]))
        }
        (Screen::Logs(..), Key::Tab) => None,
        (_, Key::Tab) => Some(AppCommand::NextPage),
        (_, Key::Char('r')) => Some(AppCommand::Refresh),

        // Logs screen
        (Screen::Logs(..), Key::Left | Key::Char('h') | Key::Esc) => Some(AppCommand::NavigateBack),
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Home) => Some(AppCommand::ScrollLogsToTop),
        (Screen::Logs(..), Key::End) => Some(AppCommand::ScrollLogsToBottom),

        // Shared list movement
        (_, Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (_, Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (_, Key::Home) => Some(AppCommand::NavigateToTop),
        (_, Key::End) => Some(AppCommand::NavigateToBottom),

        // Dashboard
        (Screen::Dashboard(..), Key::Char('c')) => Some(AppCommand::CycleCurrency),

        // Transactions screen
        (Screen::Transactions(..), Key::Char('c')) => Some(AppCommand::CycleCurrency),
        (Screen::Transactions(..), Key::Char('n')) => Some(AppCommand::EnterTransactionForm),
        (Screen::Transactions(..), Key::Char('i')) => Some(AppCommand::EnterCsvImport),
        (Screen::Transactions(..), Key::Char('/')) => Some(AppCommand::EnterFilterMode),
        (Screen::Transactions(..), Key::Char(']') | Key::Right | Key::Char('l')) => {
            Some(AppCommand::SelectAdjacentAccount { forward: true })
        }
        (Screen::Transactions(..), Key::Char('[') | Key::Left | Key::Char('h')) => {
            Some(AppCommand::SelectAdjacentAccount { forward: false })
        }

        // Categories screen
        (Screen::Categories(..), Key::Char('n')) => Some(AppCommand::EnterCategoryCreate),
        (Screen::Categories(categories_state), Key::Char('e') | Key::Enter) => categories_state
            .selected_category()
            .map(|category| AppCommand::EnterCategoryEdit {
                category_id: category.id,
            }),
        (Screen::Categories(categories_state), Key::Char('d') | Key::Delete) => categories_state
            .selected_category()
            .map(|category| AppCommand::InitiateCategoryDelete {
                category_id: category.id,
            }),

        // Budgets screen
        (Screen::Budgets(..), Key::Char('n')) => Some(AppCommand::EnterBudgetForm),
        (Screen::Budgets(budgets_state), Key::Char('d') | Key::Delete) => budgets_state
            .selected_budget()
            .map(|budget| AppCommand::DeleteBudget {
                budget_id: budget.id,
            }),

        // Ignore other keys
        _ => None,
    }
}

/// Handle keyboard input while a form or prompt is open
fn handle_form_keys(event: KeyEvent) -> Option<AppCommand> {
    match event.key {
        Key::Esc => Some(AppCommand::CancelForm),
        Key::Enter => Some(AppCommand::SubmitForm),
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),
        Key::Backspace => Some(AppCommand::DeleteFormChar),
        Key::Char(c) if !event.modifiers.ctrl => Some(AppCommand::AppendFormChar(c)),
        _ => None,
    }
}

/// Handle keyboard input when in delete confirmation mode
fn handle_delete_confirmation_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Char('y') | Key::Char('Y') | Key::Enter => Some(AppCommand::ConfirmCategoryDelete),
        // Any other key cancels
        _ => Some(AppCommand::CancelCategoryDelete),
    }
}
