use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Trait for handling command execution (production = real loader + tasks, test = mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that doesn't spawn background tasks or call the store.
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler). The handler type determines how commands are
/// executed: in production it spawns tasks, in tests it records the store
/// work and updates state synchronously.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(ui_state: AppState, handler: H) -> Self {
        Self { ui_state, handler }
    }

    /// Translate a key press to an AppCommand and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.handler
                .execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Reduce a data event, then run the command it settles into, if any
    ///
    /// Data events come from background tasks in production (store responses).
    /// In tests, you can inject events directly to simulate async operations.
    pub fn handle_data_event(&mut self, event: DataEvent) {
        if let Some(command) = reducer::reduce_data_event(&mut self.ui_state, event) {
            self.handler
                .execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Execute a command directly, bypassing key handling
    pub fn execute(&mut self, command: AppCommand) {
        self.handler
            .execute_with_context(command, &mut self.ui_state);
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
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
