use super::{AppState, LoadingState};
use crate::events::{AppCommand, DataEvent};
use crate::routes::Route;
use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use std::cell::RefCell;

/// Prefix of the `error-message` text shown when a new bill cannot be sent
pub const SUBMIT_ERROR_PREFIX: &str = "Votre facture n'a pas pu être envoyée : ";

/// Pure state transition function for data events.
///
/// Returns the command to run next when the event settles a flow that ends
/// in a navigation.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) -> Option<AppCommand> {
    match event {
        DataEvent::BillsLoaded { bills } => {
            match state.current_screen_mut() {
                Screen::Bills(bills_state) => {
                    bills_state.bills = bills;
                    bills_state.bills_loading = LoadingState::Loaded;
                    bills_state.table_state = RefCell::new(TableState::default().with_selected(0));
                }
                Screen::Dashboard(dashboard) => {
                    dashboard.set_bills(bills);
                    dashboard.bills_loading = LoadingState::Loaded;
                }
                _ => {
                    tracing::debug!("Bills loaded with no screen to show them");
                }
            }
            None
        }

        DataEvent::BillsLoadFailed { error } => {
            match state.current_screen_mut() {
                Screen::Bills(bills_state) => {
                    bills_state.bills_loading = LoadingState::Error(error);
                }
                Screen::Dashboard(dashboard) => {
                    dashboard.bills_loading = LoadingState::Error(error);
                }
                _ => {}
            }
            None
        }

        // Both outcomes of a review end on a freshly loaded dashboard
        DataEvent::BillUpdated { bill } => {
            tracing::debug!("Bill {} is now {}", bill.id, bill.status);
            Some(AppCommand::Navigate(Route::Dashboard))
        }
        DataEvent::BillUpdateFailed { bill_id, error } => {
            tracing::debug!("Review of bill {bill_id} failed: {error}");
            Some(AppCommand::Navigate(Route::Dashboard))
        }

        DataEvent::NewBillSubmitted { bill } => {
            tracing::info!("Bill {} submitted", bill.id);
            Some(AppCommand::Navigate(Route::Bills))
        }

        DataEvent::NewBillFailed { error } => {
            if let Screen::NewBill(form) = state.current_screen_mut() {
                form.error_message = Some(format!("{SUBMIT_ERROR_PREFIX}{error}"));
                form.submitting = false;
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, UserType};
    use crate::state::bills::tests::bill;
    use crate::state::dashboard::BucketId;
    use crate::state::{NewBillState, ReviewerExclusion};
    use billed_api::endpoints::BillStatus;

    fn state_for(user_type: UserType) -> AppState {
        AppState::new(
            Session::new(user_type, "someone@billed.tld"),
            ReviewerExclusion::none(),
        )
    }

    #[test]
    fn bills_loaded_fills_bills_screen() {
        let mut state = state_for(UserType::Employee);
        let follow_up = reduce_data_event(
            &mut state,
            DataEvent::BillsLoaded {
                bills: vec![bill("1", "a@x", BillStatus::Pending)],
            },
        );

        assert!(follow_up.is_none());
        let Screen::Bills(bills_state) = state.current_screen() else {
            panic!("expected bills screen");
        };
        assert_eq!(bills_state.bills.len(), 1);
        assert_eq!(bills_state.bills_loading, LoadingState::Loaded);
        assert_eq!(bills_state.table_state.borrow().selected(), Some(0));
    }

    #[test]
    fn bills_loaded_refreshes_open_dashboard_buckets() {
        let mut state = state_for(UserType::Admin);
        if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
            dashboard.toggle_bucket(BucketId::Pending);
        }

        reduce_data_event(
            &mut state,
            DataEvent::BillsLoaded {
                bills: vec![
                    bill("1", "a@x", BillStatus::Pending),
                    bill("2", "b@x", BillStatus::Refused),
                ],
            },
        );

        let Screen::Dashboard(dashboard) = state.current_screen() else {
            panic!("expected dashboard");
        };
        assert_eq!(dashboard.bucket(BucketId::Pending).cards().len(), 1);
        assert_eq!(dashboard.bills_loading, LoadingState::Loaded);
    }

    #[test]
    fn load_failure_keeps_upstream_message() {
        let mut state = state_for(UserType::Employee);
        reduce_data_event(
            &mut state,
            DataEvent::BillsLoadFailed {
                error: "Erreur 404".to_string(),
            },
        );
        let Screen::Bills(bills_state) = state.current_screen() else {
            panic!("expected bills screen");
        };
        assert_eq!(
            bills_state.bills_loading,
            LoadingState::Error("Erreur 404".to_string())
        );
    }

    #[test]
    fn settled_review_navigates_to_dashboard() {
        let mut state = state_for(UserType::Admin);
        let accepted = bill("1", "a@x", BillStatus::Accepted);
        assert_eq!(
            reduce_data_event(&mut state, DataEvent::BillUpdated { bill: accepted }),
            Some(AppCommand::Navigate(Route::Dashboard))
        );
        assert_eq!(
            reduce_data_event(
                &mut state,
                DataEvent::BillUpdateFailed {
                    bill_id: "1".into(),
                    error: "Erreur 500".to_string(),
                }
            ),
            Some(AppCommand::Navigate(Route::Dashboard))
        );
    }

    #[test]
    fn submitted_bill_navigates_to_bills() {
        let mut state = state_for(UserType::Employee);
        state.on_navigate(Route::NewBill);
        let follow_up = reduce_data_event(
            &mut state,
            DataEvent::NewBillSubmitted {
                bill: bill("k", "a@x", BillStatus::Pending),
            },
        );
        assert_eq!(follow_up, Some(AppCommand::Navigate(Route::Bills)));
    }

    #[test]
    fn failed_submission_shows_error_message() {
        let mut state = state_for(UserType::Employee);
        state.navigate_to(Screen::NewBill(Box::new(NewBillState {
            submitting: true,
            ..Default::default()
        })));

        let follow_up = reduce_data_event(
            &mut state,
            DataEvent::NewBillFailed {
                error: "Erreur 500".to_string(),
            },
        );

        assert!(follow_up.is_none());
        let Screen::NewBill(form) = state.current_screen() else {
            panic!("expected new bill screen");
        };
        assert_eq!(
            form.error_message.as_deref(),
            Some("Votre facture n'a pas pu être envoyée : Erreur 500")
        );
        assert!(!form.submitting);
    }
}
