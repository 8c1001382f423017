pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    // Screens draw their own modal forms and confirmations
    match state.current_screen() {
        Screen::Dashboard(dashboard_state) => {
            dashboard_screen::render(f, dashboard_state);
        }
        Screen::Transactions(transactions_state) => {
            transactions_screen::render(f, transactions_state);
        }
        Screen::Categories(categories_state) => {
            categories_screen::render(f, categories_state);
        }
        Screen::Budgets(budgets_state) => {
            budgets_screen::render(f, budgets_state, state.default_currency);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }

    components::toasts::render_toasts(f, &state.notifications);

    // The alert blocks input, so it is drawn above everything else
    if let Some(ref alert) = state.alert {
        components::alert_popup::render_alert(f, alert);
    }
}
