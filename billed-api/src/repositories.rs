use crate::endpoints::{
    BillId,
    bills::{Bill, CreateBill, ListBills, NewReceipt, UpdateBill},
};

pub struct BillRepository;

impl BillRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListBills {
        ListBills::new()
    }

    pub fn create(&self, email: impl Into<String>, receipt: NewReceipt) -> CreateBill {
        CreateBill::new(receipt).email(email)
    }

    pub fn update(&self, selector: BillId, bill: Bill) -> UpdateBill {
        UpdateBill::new(selector, bill)
    }
}

impl Default for BillRepository {
    fn default() -> Self {
        Self::new()
    }
}
