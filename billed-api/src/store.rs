use crate::endpoints::{
    BillId,
    bills::{Bill, NewReceipt, Upload},
};
use crate::{BilledApiError, Client, Request};
use std::future::Future;

/// The remote bill collection: list, upload a receipt, update a record.
///
/// `Client` talks to the HTTP store; tests substitute an in-memory store.
pub trait BillStore: Send + Sync + 'static {
    fn list_bills(&self) -> impl Future<Output = Result<Vec<Bill>, BilledApiError>> + Send;

    fn create_bill(
        &self,
        email: String,
        receipt: NewReceipt,
    ) -> impl Future<Output = Result<Upload, BilledApiError>> + Send;

    fn update_bill(
        &self,
        selector: BillId,
        bill: Bill,
    ) -> impl Future<Output = Result<Bill, BilledApiError>> + Send;
}

impl BillStore for Client {
    async fn list_bills(&self) -> Result<Vec<Bill>, BilledApiError> {
        self.send(Request::bills().list()).await
    }

    async fn create_bill(&self, email: String, receipt: NewReceipt) -> Result<Upload, BilledApiError> {
        self.send(Request::bills().create(email, receipt)).await
    }

    async fn update_bill(&self, selector: BillId, bill: Bill) -> Result<Bill, BilledApiError> {
        self.send(Request::bills().update(selector, bill)).await
    }
}
