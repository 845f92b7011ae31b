//! Test doubles: a synchronous command handler, a key-driven test app and an
//! in-memory bill store.

use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::{executor, Effect};
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::routes::Route;
use crate::session::{Session, UserType};
use crate::state::{AppState, DashboardState, NewBillState, ReviewerExclusion};
use crate::ui::screens::Screen;
use billed_api::endpoints::bills::{Bill, NewReceipt, Upload};
use billed_api::endpoints::{BillId, BillStatus};
use billed_api::{BillStore, BilledApiError};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mock data event handler for tests (no real async tasks)
///
/// Executes commands with `execute_command_sync` and records the store work
/// they ask for, so tests can assert on it and inject the matching events.
#[derive(Default)]
pub struct MockDataHandler {
    effects: Vec<Effect>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(effect) = executor::execute_command_sync(command, state) {
            self.effects.push(effect);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a test app for the given session, excluding nobody from review
    pub fn new(session: Session) -> Self {
        Self::with_exclusion(session, ReviewerExclusion::none())
    }

    pub fn with_exclusion(session: Session, exclusion: ReviewerExclusion) -> Self {
        Self {
            core: AppCore::new(AppState::new(session, exclusion), MockDataHandler::new()),
        }
    }

    /// Admin session landing on the dashboard
    pub fn admin() -> Self {
        Self::new(Session::new(UserType::Admin, "admin@billed.tld"))
    }

    /// Employee session landing on their bills
    pub fn employee() -> Self {
        Self::new(Session::new(UserType::Employee, "employee@billed.tld"))
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

    /// Type text one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Inject a data event (simulate a store response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Store work requested so far
    pub fn effects(&self) -> &[Effect] {
        self.core.handler().effects()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.core.handler_mut().take_effects()
    }

    pub fn dashboard(&self) -> &DashboardState {
        match self.state().current_screen() {
            Screen::Dashboard(dashboard) => &**dashboard,
            other => panic!("Expected dashboard screen, found {:?}", other),
        }
    }

    pub fn new_bill_form(&self) -> &NewBillState {
        match self.state().current_screen() {
            Screen::NewBill(form) => &**form,
            other => panic!("Expected new bill screen, found {:?}", other),
        }
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

    pub fn assert_route(&self, route: Route) {
        assert_eq!(self.state().current_route(), Some(route));
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

/// A store call seen by `MemoryStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create { email: String, file_name: String },
    Update(BillId),
}

#[derive(Default)]
struct ScriptedFailures {
    list: Option<String>,
    create: Option<String>,
    update: Option<String>,
}

/// In-memory `BillStore` with scriptable failures
#[derive(Default)]
pub struct MemoryStore {
    bills: Mutex<Vec<Bill>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<ScriptedFailures>,
}

impl MemoryStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
            ..Default::default()
        }
    }

    pub fn bills(&self) -> Vec<Bill> {
        lock(&self.bills).clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn fail_list_with(&self, message: &str) {
        lock(&self.failures).list = Some(message.to_string());
    }

    pub fn fail_create_with(&self, message: &str) {
        lock(&self.failures).create = Some(message.to_string());
    }

    pub fn fail_update_with(&self, message: &str) {
        lock(&self.failures).update = Some(message.to_string());
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BillStore for MemoryStore {
    async fn list_bills(&self) -> Result<Vec<Bill>, BilledApiError> {
        self.record(StoreCall::List);
        if let Some(message) = &lock(&self.failures).list {
            return Err(BilledApiError::message(message.clone()));
        }
        Ok(self.bills())
    }

    async fn create_bill(
        &self,
        email: String,
        receipt: NewReceipt,
    ) -> Result<Upload, BilledApiError> {
        self.record(StoreCall::Create {
            email: email.clone(),
            file_name: receipt.file_name.clone(),
        });
        if let Some(message) = &lock(&self.failures).create {
            return Err(BilledApiError::message(message.clone()));
        }

        let mut bills = lock(&self.bills);
        let key = BillId::new(format!("bill-{}", bills.len() + 1));
        let file_url = format!("https://storage.test/{}/{}", key, receipt.file_name);
        bills.push(Bill {
            id: key.clone(),
            email,
            file_name: Some(receipt.file_name),
            file_url: Some(file_url.clone()),
            status: BillStatus::Pending,
            ..Default::default()
        });
        Ok(Upload { file_url, key })
    }

    async fn update_bill(&self, selector: BillId, bill: Bill) -> Result<Bill, BilledApiError> {
        self.record(StoreCall::Update(selector.clone()));
        if let Some(message) = &lock(&self.failures).update {
            return Err(BilledApiError::message(message.clone()));
        }

        let mut bills = lock(&self.bills);
        let stored = bills
            .iter_mut()
            .find(|stored| stored.id == selector)
            .ok_or_else(|| BilledApiError::message("Erreur 404"))?;
        *stored = Bill {
            id: selector,
            ..bill
        };
        Ok(stored.clone())
    }
}
