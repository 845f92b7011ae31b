use super::Effect;
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::Screen;
use billed_api::BillStore;
use std::path::Path;

/// Execute a command: apply its state change, then spawn any store work
pub fn execute_command<S: BillStore>(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader<S>,
) {
    if let Some(effect) = execute_command_sync(command, state) {
        spawn_effect(effect, state, task_manager, data_loader);
    }
}

fn spawn_effect<S: BillStore>(
    effect: Effect,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader<S>,
) {
    let task_id = effect.task_id();
    let data_loader = data_loader.clone();

    match effect {
        Effect::LoadBills => {
            task_manager.spawn_load_task(task_id, async move {
                data_loader.load_bills().await;
            });
        }
        Effect::UpdateBill(bill) => {
            let started = task_manager.spawn_exclusive(task_id.clone(), async move {
                data_loader.review_bill(bill).await;
            });
            if !started {
                tracing::warn!("Task {} is still running, review not sent", task_id);
                if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                    dashboard.review_in_flight = None;
                }
            }
        }
        Effect::SubmitNewBill { bill, receipt } => {
            let started = task_manager.spawn_exclusive(task_id.clone(), async move {
                data_loader.submit_new_bill(bill, receipt).await;
            });
            if !started {
                tracing::warn!("Task {} is still running, bill not sent", task_id);
                if let Screen::NewBill(form) = state.current_screen_mut() {
                    form.submitting = false;
                }
            }
        }
    }
}

/// Apply a command to state without touching the store.
///
/// Returns the store work the command needs; `execute_command` spawns it,
/// tests inspect it and inject the matching `DataEvent`s instead.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<Effect> {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let effect = match command {
        // Simple state updates
        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }
        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
            None
        }
        AppCommand::ClearPendingKey => {
            state.pending_key = None;
            None
        }
        AppCommand::DismissModal => {
            state.modal = None;
            None
        }

        // Navigation
        AppCommand::Navigate(route) => {
            if state.on_navigate(route) && route.needs_bills() {
                Some(Effect::LoadBills)
            } else {
                None
            }
        }
        AppCommand::NavigateBack => {
            state.navigate_back();
            None
        }
        AppCommand::SelectNext => {
            match state.current_screen_mut() {
                Screen::Bills(s) => s.select_next(),
                Screen::Dashboard(s) => s.select_next(),
                Screen::NewBill(_) | Screen::Logs(_) => {}
            }
            None
        }
        AppCommand::SelectPrevious => {
            match state.current_screen_mut() {
                Screen::Bills(s) => s.select_prev(),
                Screen::Dashboard(s) => s.select_prev(),
                Screen::NewBill(_) | Screen::Logs(_) => {}
            }
            None
        }

        AppCommand::LoadBills => match state.current_screen_mut() {
            Screen::Bills(s) => {
                tracing::debug!("Refreshing bills screen");
                s.bills_loading = LoadingState::loading();
                Some(Effect::LoadBills)
            }
            Screen::Dashboard(s) => {
                tracing::debug!("Refreshing dashboard");
                s.bills_loading = LoadingState::loading();
                Some(Effect::LoadBills)
            }
            _ => None,
        },

        // Dashboard
        AppCommand::ToggleBucket(bucket_id) => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                s.toggle_bucket(bucket_id);
            }
            None
        }
        AppCommand::OpenBillDetail { bill_id } => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                s.open_or_close_detail(&bill_id);
            }
            None
        }
        AppCommand::ReviewBill { bill_id, decision } => review_bill(state, bill_id, decision),
        AppCommand::ShowReceipt { bill_id } => {
            let modal = match state.current_screen() {
                Screen::Dashboard(s) => s.bill(&bill_id).map(Modal::receipt),
                Screen::Bills(s) => s.bills.iter().find(|b| b.id == bill_id).map(Modal::receipt),
                _ => None,
            };
            if modal.is_none() {
                tracing::debug!("No bill {} to show a receipt for", bill_id);
            }
            state.modal = modal;
            None
        }

        AppCommand::EnterCommentMode => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                if s.can_review() {
                    s.input_mode = InputMode::Comment;
                }
            }
            None
        }
        AppCommand::ExitCommentMode => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Normal;
            }
            None
        }
        AppCommand::AppendCommentChar(c) => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                s.comment.push(c);
            }
            None
        }
        AppCommand::DeleteCommentChar => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                s.comment.pop();
            }
            None
        }

        // New bill form
        AppCommand::NavigateFormField { forward } => {
            if let Screen::NewBill(form) = state.current_screen_mut() {
                form.current_field = if forward {
                    form.current_field.next()
                } else {
                    form.current_field.prev()
                };
            }
            None
        }
        AppCommand::AppendFormFieldChar { c } => {
            if let Screen::NewBill(form) = state.current_screen_mut() {
                form.push_char(c);
            }
            None
        }
        AppCommand::DeleteFormFieldChar => {
            if let Screen::NewBill(form) = state.current_screen_mut() {
                form.pop_char();
            }
            None
        }
        AppCommand::CycleExpenseType { forward } => {
            if let Screen::NewBill(form) = state.current_screen_mut() {
                form.cycle_expense_type(forward);
            }
            None
        }
        AppCommand::ChangeFile => {
            change_file(state);
            None
        }
        AppCommand::SubmitNewBill => submit_new_bill(state),

        // Log screen commands
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
            None
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
            None
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = (s.scroll_offset + 20).min(s.total_entries.saturating_sub(1));
            }
            None
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(20);
            }
            None
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
            None
        }
    };

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    effect
}

fn review_bill(
    state: &mut AppState,
    bill_id: billed_api::endpoints::BillId,
    decision: bills::ReviewDecision,
) -> Option<Effect> {
    let Screen::Dashboard(dashboard) = state.current_screen_mut() else {
        return None;
    };

    if let Some(in_flight) = &dashboard.review_in_flight {
        tracing::warn!(
            "Review of bill {} still in flight, ignoring {:?} on {}",
            in_flight,
            decision,
            bill_id
        );
        return None;
    }

    let bill = dashboard
        .selected_bill()
        .filter(|bill| bill.id == bill_id && bill.is_pending())?;
    let reviewed = decision.apply(bill, &dashboard.comment);

    tracing::info!("Sending {:?} for bill {}", decision, bill_id);
    dashboard.review_in_flight = Some(bill_id);
    dashboard.input_mode = InputMode::Normal;
    Some(Effect::UpdateBill(reviewed))
}

fn change_file(state: &mut AppState) {
    let Screen::NewBill(form) = state.current_screen_mut() else {
        return;
    };

    let path = form.file_input.trim().to_string();
    if path.is_empty() {
        form.receipt = None;
        return;
    }

    match validators::load_receipt(Path::new(&path)) {
        Ok(receipt) => {
            tracing::info!(
                "Staged receipt {} ({})",
                receipt.file_name,
                receipt.content_type
            );
            form.receipt = Some(receipt);
        }
        Err(e) => {
            tracing::debug!("Rejected receipt {}: {}", path, e);
            form.reset_file();
            state.show_alert(e.to_string());
        }
    }
}

fn submit_new_bill(state: &mut AppState) -> Option<Effect> {
    let email = state.session.email.clone();
    let Screen::NewBill(form) = state.current_screen_mut() else {
        return None;
    };
    if form.submitting {
        tracing::debug!("New bill already being sent");
        return None;
    }

    match validators::validate_new_bill(form, &email) {
        Ok((bill, receipt)) => {
            form.submitting = true;
            form.error_message = None;
            Some(Effect::SubmitNewBill { bill, receipt })
        }
        Err(e) => {
            state.show_alert(e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;
    use crate::session::{Session, UserType};
    use crate::state::bills::{tests::bill, ReviewDecision};
    use crate::state::dashboard::{BucketId, Selection};
    use crate::testing::MemoryStore;
    use billed_api::endpoints::{BillId, BillStatus};
    use std::io::Write;

    fn admin_with_bills() -> AppState {
        let mut state = AppState::new(
            Session::new(UserType::Admin, "admin@billed.tld"),
            ReviewerExclusion::none(),
        );
        if let Screen::Dashboard(s) = state.current_screen_mut() {
            s.set_bills(vec![
                bill("p1", "jane.doe@x.com", BillStatus::Pending),
                bill("a1", "john.smith@x.com", BillStatus::Accepted),
            ]);
        }
        state
    }

    fn dashboard(state: &AppState) -> &DashboardState {
        match state.current_screen() {
            Screen::Dashboard(s) => &**s,
            other => panic!("expected dashboard, got {:?}", other),
        }
    }

    fn employee_on_form() -> AppState {
        let mut state = AppState::new(
            Session::new(UserType::Employee, "jane.doe@x.com"),
            ReviewerExclusion::none(),
        );
        state.on_navigate(Route::NewBill);
        state
    }

    fn form(state: &mut AppState) -> &mut NewBillState {
        match state.current_screen_mut() {
            Screen::NewBill(form) => &mut **form,
            other => panic!("expected new bill form, got {:?}", other),
        }
    }

    #[test]
    fn navigate_to_dashboard_requests_load() {
        let mut state = admin_with_bills();
        let effect = execute_command_sync(AppCommand::Navigate(Route::Dashboard), &mut state);
        assert_eq!(effect, Some(Effect::LoadBills));
        assert!(dashboard(&state).bills.is_empty());
    }

    #[test]
    fn review_sends_update_with_comment() {
        let mut state = admin_with_bills();
        execute_command_sync(AppCommand::ToggleBucket(BucketId::Pending), &mut state);
        execute_command_sync(
            AppCommand::OpenBillDetail {
                bill_id: "p1".into(),
            },
            &mut state,
        );
        for c in "ok".chars() {
            execute_command_sync(AppCommand::AppendCommentChar(c), &mut state);
        }

        let effect = execute_command_sync(
            AppCommand::ReviewBill {
                bill_id: "p1".into(),
                decision: ReviewDecision::Refuse,
            },
            &mut state,
        );

        let Some(Effect::UpdateBill(sent)) = effect else {
            panic!("expected an update, got {:?}", effect);
        };
        assert_eq!(sent.status, BillStatus::Refused);
        assert_eq!(sent.comment_admin.as_deref(), Some("ok"));
        assert_eq!(dashboard(&state).review_in_flight, Some(BillId::from("p1")));
    }

    #[test]
    fn second_review_is_refused_while_first_is_in_flight() {
        let mut state = admin_with_bills();
        execute_command_sync(AppCommand::ToggleBucket(BucketId::Pending), &mut state);
        execute_command_sync(
            AppCommand::OpenBillDetail {
                bill_id: "p1".into(),
            },
            &mut state,
        );
        let review = AppCommand::ReviewBill {
            bill_id: "p1".into(),
            decision: ReviewDecision::Accept,
        };

        assert!(execute_command_sync(review.clone(), &mut state).is_some());
        assert!(execute_command_sync(review, &mut state).is_none());
    }

    #[tokio::test]
    async fn refused_update_task_releases_review_controls() {
        let mut state = admin_with_bills();
        execute_command_sync(AppCommand::ToggleBucket(BucketId::Pending), &mut state);
        execute_command_sync(
            AppCommand::OpenBillDetail {
                bill_id: "p1".into(),
            },
            &mut state,
        );
        let mut task_manager = BackgroundTaskManager::new();
        assert!(task_manager.spawn_exclusive(
            "update_bill_p1".to_string(),
            std::future::pending::<()>()
        ));
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let data_loader = DataLoader::new(std::sync::Arc::new(MemoryStore::default()), tx);

        execute_command(
            AppCommand::ReviewBill {
                bill_id: "p1".into(),
                decision: ReviewDecision::Accept,
            },
            &mut state,
            &mut task_manager,
            &data_loader,
        );

        assert_eq!(dashboard(&state).review_in_flight, None);
        assert!(dashboard(&state).can_review());
    }

    #[test]
    fn non_pending_bills_cannot_be_reviewed() {
        let mut state = admin_with_bills();
        execute_command_sync(AppCommand::ToggleBucket(BucketId::Accepted), &mut state);
        execute_command_sync(
            AppCommand::OpenBillDetail {
                bill_id: "a1".into(),
            },
            &mut state,
        );
        let effect = execute_command_sync(
            AppCommand::ReviewBill {
                bill_id: "a1".into(),
                decision: ReviewDecision::Refuse,
            },
            &mut state,
        );
        assert!(effect.is_none());
        assert_eq!(dashboard(&state).selection(), &Selection::Selected("a1".into()));
    }

    #[test]
    fn receipt_modal_opens_and_closes() {
        let mut state = admin_with_bills();
        execute_command_sync(
            AppCommand::ShowReceipt {
                bill_id: "p1".into(),
            },
            &mut state,
        );
        assert_eq!(
            state.modal,
            Some(Modal::Receipt {
                file_name: Some("p1.jpg".to_string()),
                file_url: Some("https://storage.test/p1.jpg".to_string()),
            })
        );

        execute_command_sync(AppCommand::DismissModal, &mut state);
        assert!(state.modal.is_none());
    }

    #[test]
    fn invalid_submission_alerts_without_effect() {
        let mut state = employee_on_form();
        form(&mut state).amount = "0".to_string();
        form(&mut state).date = "2022-04-04".to_string();

        let effect = execute_command_sync(AppCommand::SubmitNewBill, &mut state);

        assert!(effect.is_none());
        assert_eq!(
            state.modal,
            Some(Modal::Alert("Le montant doit être supérieur à 0".to_string()))
        );
        assert!(!form(&mut state).submitting);
    }

    #[test]
    fn rejected_file_is_reset_with_alert() {
        let mut state = employee_on_form();
        form(&mut state).file_input = "/tmp/notes.pdf".to_string();

        execute_command_sync(AppCommand::ChangeFile, &mut state);

        assert!(form(&mut state).file_input.is_empty());
        assert!(form(&mut state).receipt.is_none());
        assert!(matches!(state.modal, Some(Modal::Alert(_))));
    }

    #[test]
    fn valid_submission_stages_upload_and_bill() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facture.jpeg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"jpeg")
            .unwrap();

        let mut state = employee_on_form();
        {
            let form = form(&mut state);
            form.file_input = path.display().to_string();
            form.date = "2022-04-04".to_string();
            form.amount = "120".to_string();
        }
        execute_command_sync(AppCommand::ChangeFile, &mut state);
        assert!(state.modal.is_none());

        let effect = execute_command_sync(AppCommand::SubmitNewBill, &mut state);
        let Some(Effect::SubmitNewBill { bill, receipt }) = effect else {
            panic!("expected a submission, got {:?}", effect);
        };
        assert_eq!(bill.email, "jane.doe@x.com");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(receipt.content_type, "image/jpeg");
        assert_eq!(receipt.bytes, b"jpeg");
        assert!(form(&mut state).submitting);

        // A second submit while the first runs does nothing
        assert!(execute_command_sync(AppCommand::SubmitNewBill, &mut state).is_none());
    }

    #[test]
    fn pending_key_is_cleared_by_next_command() {
        let mut state = admin_with_bills();
        execute_command_sync(AppCommand::SetPendingKey('g'), &mut state);
        assert_eq!(state.pending_key, Some('g'));
        execute_command_sync(AppCommand::ToggleHelp, &mut state);
        assert_eq!(state.pending_key, None);
        assert!(state.help_visible);
    }
}
