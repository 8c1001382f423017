use std::time::Instant;

use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent, DataRequest};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through execute_command_sync; any backend work they ask for is
/// recorded instead of performed.
#[derive(Debug, Default)]
pub struct MockDataHandler {
    pub requests: Vec<DataRequest>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(request) = executor::execute_command_sync(command, state) {
            self.requests.push(request);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a new test app on the dashboard, with its load already requested
    pub fn new() -> Self {
        let mut core = AppCore::new(MockDataHandler::new());
        core.start();
        Self { core }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type each character of `text` as a separate key press
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn tick(&mut self, now: Instant) {
        self.core.tick(now);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    /// Every backend request issued so far, oldest first
    pub fn requests(&self) -> &[DataRequest] {
        &self.core.handler().requests
    }

    pub fn last_request(&self) -> Option<&DataRequest> {
        self.requests().last()
    }

    /// Forget recorded requests so a test can focus on what happens next
    pub fn clear_requests(&mut self) {
        self.core.handler_mut().requests.clear();
    }

    /// Toast messages currently on screen
    pub fn notification_messages(&self) -> Vec<String> {
        self.state()
            .notifications
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
