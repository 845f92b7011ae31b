pub mod bills_screen;
pub mod dashboard_screen;
pub mod logs_screen;
pub mod new_bill_screen;

use crate::routes::Route;
use crate::state::{BillsState, DashboardState, LogsState, NewBillState};

#[derive(Debug, Clone)]
pub enum Screen {
    Bills(BillsState),
    NewBill(Box<NewBillState>),
    Dashboard(Box<DashboardState>),
    Logs(LogsState),
}

impl Screen {
    /// Route this screen is registered under; the logs viewer has none
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Bills(_) => Some(Route::Bills),
            Self::NewBill(_) => Some(Route::NewBill),
            Self::Dashboard(_) => Some(Route::Dashboard),
            Self::Logs(_) => None,
        }
    }
}
