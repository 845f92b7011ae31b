use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::routes::Route;
use crate::state::bills::ReviewDecision;
use crate::state::dashboard::BucketId;
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+C always quits
    if event.is_ctrl('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 1: a modal blocks everything until dismissed
    if state.modal.is_some() {
        return match key {
            Key::Enter | Key::Esc | Key::Char(' ') => Some(AppCommand::DismissModal),
            _ => None,
        };
    }

    // Priority 2: the New Bill form captures typed characters
    if let Screen::NewBill(form) = state.current_screen() {
        return handle_new_bill_keys(event, form);
    }

    // Priority 3: typing an admin comment
    if let Screen::Dashboard(dashboard) = state.current_screen() {
        if dashboard.input_mode == InputMode::Comment {
            return match key {
                Key::Enter | Key::Esc | Key::Tab => Some(AppCommand::ExitCommentMode),
                Key::Backspace => Some(AppCommand::DeleteCommentChar),
                Key::Char(c) => Some(AppCommand::AppendCommentChar(c)),
                _ => None,
            };
        }
    }

    // Priority 4: help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            ('g', Key::Char('b')) => Some(AppCommand::Navigate(Route::Bills)),
            ('g', Key::Char('n')) => Some(AppCommand::Navigate(Route::NewBill)),
            ('g', Key::Char('d')) => Some(AppCommand::Navigate(Route::Dashboard)),
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

        // Global back navigation (left/h)
        (_, Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Dashboard
        (Screen::Dashboard(..), Key::Char(c @ '1'..='3')) => {
            let index = c.to_digit(10)? as u8;
            BucketId::from_index(index).map(AppCommand::ToggleBucket)
        }
        (Screen::Dashboard(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Dashboard(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Dashboard(dashboard), Key::Enter | Key::Right | Key::Char('l')) => dashboard
            .focused_card()
            .map(|card| AppCommand::OpenBillDetail {
                bill_id: card.bill_id.clone(),
            }),
        (Screen::Dashboard(dashboard), Key::Char('c')) => {
            dashboard.can_review().then_some(AppCommand::EnterCommentMode)
        }
        (Screen::Dashboard(dashboard), Key::Char('a')) => {
            review_command(dashboard, ReviewDecision::Accept)
        }
        (Screen::Dashboard(dashboard), Key::Char('x')) => {
            review_command(dashboard, ReviewDecision::Refuse)
        }
        (Screen::Dashboard(dashboard), Key::Char('e')) => {
            // Eye icon of the open bill, else of the focused card
            let bill_id = match dashboard.selection().bill_id() {
                Some(bill_id) => bill_id.clone(),
                None => dashboard.focused_card()?.bill_id.clone(),
            };
            Some(AppCommand::ShowReceipt { bill_id })
        }
        (Screen::Dashboard(..), Key::Char('r')) => Some(AppCommand::LoadBills),

        // Employee bills
        (Screen::Bills(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Bills(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Bills(bills_state), Key::Enter | Key::Char('e')) => bills_state
            .selected_bill()
            .map(|bill| AppCommand::ShowReceipt {
                bill_id: bill.id.clone(),
            }),
        (Screen::Bills(..), Key::Char('n')) => Some(AppCommand::Navigate(Route::NewBill)),
        (Screen::Bills(..), Key::Char('r')) => Some(AppCommand::LoadBills),

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Home) => Some(AppCommand::ScrollLogsToTop),
        (Screen::Logs(..), Key::End) => Some(AppCommand::ScrollLogsToBottom),
        (Screen::Logs(..), Key::Esc) => Some(AppCommand::NavigateBack),

        // Ignore other keys
        _ => None,
    }
}

fn review_command(dashboard: &DashboardState, decision: ReviewDecision) -> Option<AppCommand> {
    if !dashboard.can_review() {
        return None;
    }
    let bill = dashboard.selected_bill()?;
    Some(AppCommand::ReviewBill {
        bill_id: bill.id.clone(),
        decision,
    })
}

/// Handle keyboard input on the New Bill form
fn handle_new_bill_keys(event: KeyEvent, form: &NewBillState) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+S submits from any field
    if event.is_ctrl('s') {
        return Some(AppCommand::SubmitNewBill);
    }

    match (form.current_field, key) {
        // Escape abandons the form
        (_, Key::Esc) => Some(AppCommand::Navigate(Route::Bills)),

        (_, Key::Tab | Key::Down) => Some(AppCommand::NavigateFormField { forward: true }),
        (_, Key::BackTab | Key::Up) => Some(AppCommand::NavigateFormField { forward: false }),

        (NewBillField::ExpenseType, Key::Right | Key::Char(' ')) => {
            Some(AppCommand::CycleExpenseType { forward: true })
        }
        (NewBillField::ExpenseType, Key::Left) => {
            Some(AppCommand::CycleExpenseType { forward: false })
        }

        // Enter on the file input picks the typed path
        (NewBillField::File, Key::Enter) => Some(AppCommand::ChangeFile),
        (NewBillField::Submit, Key::Enter) => Some(AppCommand::SubmitNewBill),
        (_, Key::Enter) => Some(AppCommand::NavigateFormField { forward: true }),

        (NewBillField::ExpenseType | NewBillField::Submit, _) => None,
        (_, Key::Backspace) => Some(AppCommand::DeleteFormFieldChar),
        (_, Key::Char(c)) => Some(AppCommand::AppendFormFieldChar { c }),
        _ => None,
    }
}
