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
    match state.current_screen() {
        Screen::Bills(bills_state) => {
            bills_screen::render(f, bills_state, &state.session);
        }
        Screen::NewBill(form) => {
            new_bill_screen::render(f, form);
        }
        Screen::Dashboard(dashboard) => {
            dashboard_screen::render(f, &dashboard.view(), &dashboard.bills_loading);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Blocking modal above the screen, help above everything
    if let Some(modal) = &state.modal {
        components::modal::render_modal(f, modal);
    }
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
