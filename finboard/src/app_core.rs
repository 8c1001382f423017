use std::time::Instant;

use crate::commands::handlers;
use crate::config::Settings;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState, Page};

/// Trait for handling command execution (production = real loader + tasks, test = mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that doesn't spawn background tasks or make API calls.
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler). The handler type determines how commands are
/// executed: in production it spawns tasks, in tests it records the requests.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    /// Create a new application core with default settings
    pub fn new(handler: H) -> Self {
        Self::with_settings(handler, &Settings::default())
    }

    pub fn with_settings(handler: H, settings: &Settings) -> Self {
        Self {
            ui_state: AppState::with_settings(settings),
            handler,
        }
    }

    /// Mount the dashboard and request its data
    pub fn start(&mut self) {
        self.execute(AppCommand::SwitchPage(Page::Dashboard));
    }

    /// Handle keyboard input and execute the resulting command
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.handler.execute_with_context(command, &mut self.ui_state);
    }

    /// Handle a data event (for test injection or async results)
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    /// Periodic housekeeping: drop expired toasts and advance the spinner
    pub fn tick(&mut self, now: Instant) {
        let expired = self.ui_state.notifications.expire(now);
        if expired > 0 {
            tracing::trace!("Expired {} notifications", expired);
        }
        if let Some(throbber_state) = self.ui_state.loading_state() {
            throbber_state.calc_next();
        }
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
