pub mod executor;
pub mod handlers;

pub use crate::events::AppCommand;

use billed_api::endpoints::bills::{Bill, NewReceipt};

/// Store work a command asks for once its state change is applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadBills,
    /// Persist an admin review of a bill
    UpdateBill(Bill),
    /// Upload the receipt, then record the bill under the returned key
    SubmitNewBill { bill: Bill, receipt: NewReceipt },
}

impl Effect {
    /// Key of the background task running this effect
    pub fn task_id(&self) -> String {
        match self {
            Self::LoadBills => "load_bills".to_string(),
            Self::UpdateBill(bill) => format!("update_bill_{}", bill.id),
            Self::SubmitNewBill { .. } => "submit_new_bill".to_string(),
        }
    }
}
