pub mod bills;
pub mod dashboard;
pub mod new_bill;
pub mod reducer;
pub mod validators;

use crate::routes::Route;
use crate::session::Session;
use crate::ui::screens::Screen;
use billed_api::endpoints::bills::Bill;
use itertools::Itertools;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use throbber_widgets_tui::ThrobberState;

pub use bills::ReviewerExclusion;
pub use dashboard::DashboardState;
pub use new_bill::{NewBillField, NewBillState};

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        Self::Loading(ThrobberState::default())
    }
}

/// Represents input mode for screens that support editing
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the admin comment of the open bill
    Comment,
}

/// Blocking popup drawn above the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Alert(String),
    Receipt {
        file_name: Option<String>,
        file_url: Option<String>,
    },
}

impl Modal {
    pub fn receipt(bill: &Bill) -> Self {
        Self::Receipt {
            file_name: bill.file_name.clone(),
            file_url: bill.file_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    screen: Screen,
    pub history: Vec<Screen>,

    // Session
    pub session: Session,
    pub exclusion: ReviewerExclusion,

    // UI state
    pub modal: Option<Modal>,
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: Session, exclusion: ReviewerExclusion) -> Self {
        let home = Route::home_for(session.user_type);
        let mut state = Self {
            screen: Screen::Logs(LogsState::default()),
            history: Vec::new(),
            session,
            exclusion,
            modal: None,
            help_visible: false,
            pending_key: None,
            should_quit: false,
        };
        state.screen = state.screen_for(home);
        state
    }

    pub fn current_screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn current_route(&self) -> Option<Route> {
        self.screen.route()
    }

    /// Navigate to a new screen, keeping the current one to go back to
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        let previous = std::mem::replace(&mut self.screen, screen);
        self.history.push(previous);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                tracing::debug!(
                    "Navigating back, stack depth: {} -> {}",
                    self.history.len() + 1,
                    self.history.len()
                );
                self.screen = previous;
                true
            }
            None => {
                tracing::debug!("Cannot navigate back, already at root screen");
                false
            }
        }
    }

    /// Replace the current view with a freshly built one for `route`.
    /// Login ends the session. Returns false when the route is refused.
    pub fn on_navigate(&mut self, route: Route) -> bool {
        if route == Route::Login {
            tracing::info!("Navigating to login, ending session");
            self.should_quit = true;
            return true;
        }
        if !route.is_allowed_for(self.session.user_type) {
            tracing::warn!(
                "Route {} is not available to {:?} users",
                route,
                self.session.user_type
            );
            return false;
        }

        tracing::debug!("Navigating to {}", route);
        self.screen = self.screen_for(route);
        self.modal = None;
        true
    }

    /// Fresh screen state for a route. Routes that show bills start loading.
    pub fn screen_for(&self, route: Route) -> Screen {
        match route {
            Route::Dashboard => {
                let mut dashboard = DashboardState::new(self.exclusion.clone());
                dashboard.bills_loading = LoadingState::loading();
                Screen::Dashboard(Box::new(dashboard))
            }
            Route::NewBill => Screen::NewBill(Box::default()),
            Route::Bills | Route::Login => Screen::Bills(BillsState {
                bills_loading: LoadingState::loading(),
                ..Default::default()
            }),
        }
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Alert: {}", message);
        self.modal = Some(Modal::Alert(message));
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Bills(state) => &mut state.bills_loading,
            Screen::Dashboard(state) => &mut state.bills_loading,
            Screen::NewBill(_) | Screen::Logs(_) => return None,
        };
        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

/// Employee's own bills list
#[derive(Default, Debug, Clone)]
pub struct BillsState {
    pub bills: Vec<Bill>,
    pub bills_loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl BillsState {
    /// Bills from latest to earliest date; undated bills last
    pub fn sorted_bills(&self) -> Vec<&Bill> {
        self.bills
            .iter()
            .sorted_by(|a, b| b.parsed_date().cmp(&a.parsed_date()))
            .collect()
    }

    pub fn selected_bill(&self) -> Option<&Bill> {
        let index = self.table_state.borrow().selected()?;
        self.sorted_bills().get(index).copied()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for BillsState {
    fn num_items(&self) -> usize {
        self.bills.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserType;
    use crate::state::bills::tests::bill;
    use billed_api::endpoints::BillStatus;

    fn admin_state() -> AppState {
        AppState::new(
            Session::new(UserType::Admin, "admin@billed.tld"),
            ReviewerExclusion::none(),
        )
    }

    #[test]
    fn starts_on_home_route_for_user_type() {
        assert_eq!(admin_state().current_route(), Some(Route::Dashboard));

        let employee = AppState::new(
            Session::new(UserType::Employee, "jane.doe@x.com"),
            ReviewerExclusion::none(),
        );
        assert_eq!(employee.current_route(), Some(Route::Bills));
        assert!(employee.history.is_empty());
    }

    #[test]
    fn on_navigate_rebuilds_dashboard() {
        let mut state = admin_state();
        if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
            dashboard.set_bills(vec![bill("1", "a.b@x.com", BillStatus::Pending)]);
            dashboard.toggle_bucket(dashboard::BucketId::Pending);
        }

        assert!(state.on_navigate(Route::Dashboard));
        let Screen::Dashboard(dashboard) = state.current_screen() else {
            panic!("expected dashboard");
        };
        assert!(dashboard.bills.is_empty());
        assert!(!dashboard.bucket(dashboard::BucketId::Pending).is_open());
        assert!(matches!(dashboard.bills_loading, LoadingState::Loading(_)));
        assert!(state.history.is_empty());
    }

    #[test]
    fn on_navigate_to_login_quits() {
        let mut state = admin_state();
        state.on_navigate(Route::Login);
        assert!(state.should_quit);
    }

    #[test]
    fn employees_cannot_open_dashboard() {
        let mut state = AppState::new(
            Session::new(UserType::Employee, "jane.doe@x.com"),
            ReviewerExclusion::none(),
        );
        assert!(!state.on_navigate(Route::Dashboard));
        assert_eq!(state.current_route(), Some(Route::Bills));
    }

    #[test]
    fn navigate_back_restores_previous_screen() {
        let mut state = admin_state();
        state.navigate_to(Screen::Logs(LogsState::default()));
        assert_eq!(state.current_route(), None);

        assert!(state.navigate_back());
        assert_eq!(state.current_route(), Some(Route::Dashboard));
        assert!(!state.navigate_back());
    }

    #[test]
    fn bills_are_sorted_latest_first() {
        let mut old = bill("old", "a@x", BillStatus::Pending);
        old.date = "2001-01-01".to_string();
        let mut new = bill("new", "a@x", BillStatus::Pending);
        new.date = "2022-12-31".to_string();
        let mut undated = bill("undated", "a@x", BillStatus::Pending);
        undated.date = String::new();

        let state = BillsState {
            bills: vec![old, undated, new],
            ..Default::default()
        };
        let ids: Vec<_> = state.sorted_bills().iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn selected_bill_follows_sorted_order() {
        let mut first = bill("1", "a@x", BillStatus::Pending);
        first.date = "2020-01-01".to_string();
        let mut second = bill("2", "a@x", BillStatus::Pending);
        second.date = "2021-01-01".to_string();

        let state = BillsState {
            bills: vec![first, second],
            table_state: RefCell::new(TableState::default().with_selected(0)),
            ..Default::default()
        };
        assert_eq!(state.selected_bill().map(|b| b.id.to_string()), Some("2".into()));
    }
}
