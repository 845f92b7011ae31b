use crate::events::DataEvent;
use billed_api::endpoints::bills::{Bill, NewReceipt};
use billed_api::{BillStore, BilledApiError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs store calls and reports their outcome as data events
pub struct DataLoader<S> {
    pub store: Arc<S>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl<S> Clone for DataLoader<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            data_tx: self.data_tx.clone(),
        }
    }
}

impl<S: BillStore> DataLoader<S> {
    pub fn new(store: Arc<S>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { store, data_tx }
    }

    /// Load every bill from the store
    pub async fn load_bills(&self) {
        tracing::info!("Loading bills");
        match self.store.list_bills().await {
            Ok(bills) => {
                tracing::info!("Loaded {} bills", bills.len());
                let _ = self.data_tx.send(DataEvent::BillsLoaded { bills });
            }
            Err(e) => {
                tracing::error!("Failed to load bills: {}", e);
                let _ = self.data_tx.send(DataEvent::BillsLoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Update a bill keyed by its id. Failures are logged here.
    pub async fn update_bill(&self, bill: Bill) -> Result<Bill, BilledApiError> {
        let selector = bill.id.clone();
        tracing::debug!("Updating bill {}", selector);
        self.store
            .update_bill(selector.clone(), bill)
            .await
            .inspect_err(|e| tracing::error!("Failed to update bill {}: {}", selector, e))
    }

    /// Send an admin review. The dashboard reloads whatever the outcome.
    pub async fn review_bill(&self, bill: Bill) {
        let bill_id = bill.id.clone();
        let event = match self.update_bill(bill).await {
            Ok(bill) => DataEvent::BillUpdated { bill },
            Err(e) => DataEvent::BillUpdateFailed {
                bill_id,
                error: e.to_string(),
            },
        };
        let _ = self.data_tx.send(event);
    }

    /// Upload the receipt, then record the bill under the key the upload
    /// returned. The update only runs once the upload has succeeded.
    pub async fn submit_new_bill(&self, mut bill: Bill, receipt: NewReceipt) {
        tracing::info!("Uploading receipt {}", receipt.file_name);

        let upload = match self.store.create_bill(bill.email.clone(), receipt).await {
            Ok(upload) => upload,
            Err(e) => {
                tracing::error!("Failed to upload receipt: {}", e);
                let _ = self.data_tx.send(DataEvent::NewBillFailed {
                    error: e.to_string(),
                });
                return;
            }
        };

        tracing::debug!("Receipt stored at {} under {}", upload.file_url, upload.key);
        bill.id = upload.key;
        bill.file_url = Some(upload.file_url);

        let event = match self.update_bill(bill).await {
            Ok(bill) => DataEvent::NewBillSubmitted { bill },
            Err(e) => DataEvent::NewBillFailed {
                error: e.to_string(),
            },
        };
        let _ = self.data_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::bills::tests::bill;
    use crate::testing::{MemoryStore, StoreCall};
    use billed_api::endpoints::BillStatus;

    fn loader(store: MemoryStore) -> (DataLoader<MemoryStore>, mpsc::UnboundedReceiver<DataEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DataLoader::new(Arc::new(store), tx), rx)
    }

    fn receipt() -> NewReceipt {
        NewReceipt {
            file_name: "facture.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"png".to_vec(),
        }
    }

    fn new_bill() -> Bill {
        Bill {
            id: Default::default(),
            file_url: None,
            ..bill("", "jane.doe@x.com", BillStatus::Pending)
        }
    }

    #[tokio::test]
    async fn load_bills_sends_store_content() {
        let store = MemoryStore::with_bills(vec![bill("1", "a@x", BillStatus::Pending)]);
        let (loader, mut rx) = loader(store);

        loader.load_bills().await;

        match rx.recv().await {
            Some(DataEvent::BillsLoaded { bills }) => assert_eq!(bills.len(), 1),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn load_failure_carries_message() {
        let store = MemoryStore::default();
        store.fail_list_with("Erreur 404");
        let (loader, mut rx) = loader(store);

        loader.load_bills().await;

        assert_eq!(
            rx.recv().await,
            Some(DataEvent::BillsLoadFailed {
                error: "Erreur 404".to_string()
            })
        );
    }

    #[tokio::test]
    async fn review_is_reported_even_when_update_fails() {
        let store = MemoryStore::with_bills(vec![bill("1", "a@x", BillStatus::Pending)]);
        store.fail_update_with("Erreur 500");
        let (loader, mut rx) = loader(store);

        let reviewed = crate::state::bills::accept_bill(&bill("1", "a@x", BillStatus::Pending), "");
        loader.review_bill(reviewed).await;

        assert_eq!(
            rx.recv().await,
            Some(DataEvent::BillUpdateFailed {
                bill_id: "1".into(),
                error: "Erreur 500".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn review_updates_stored_bill() {
        let store = Arc::new(MemoryStore::with_bills(vec![bill(
            "1",
            "a@x",
            BillStatus::Pending,
        )]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = DataLoader::new(store.clone(), tx);

        let refused = crate::state::bills::refuse_bill(&bill("1", "a@x", BillStatus::Pending), "non");
        loader.review_bill(refused).await;

        assert!(matches!(rx.recv().await, Some(DataEvent::BillUpdated { .. })));
        let stored = store.bills();
        assert_eq!(stored[0].status, BillStatus::Refused);
        assert_eq!(stored[0].comment_admin.as_deref(), Some("non"));
    }

    #[tokio::test]
    async fn submit_creates_then_updates_under_returned_key() {
        let store = Arc::new(MemoryStore::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = DataLoader::new(store.clone(), tx);

        loader.submit_new_bill(new_bill(), receipt()).await;

        let Some(DataEvent::NewBillSubmitted { bill }) = rx.recv().await else {
            panic!("expected submission event");
        };
        assert!(!bill.id.is_empty());
        assert!(bill.file_url.is_some());

        let calls = store.calls();
        assert!(matches!(calls[0], StoreCall::Create { .. }));
        assert_eq!(calls[1], StoreCall::Update(bill.id.clone()));
    }

    #[tokio::test]
    async fn failed_upload_skips_update() {
        let store = Arc::new(MemoryStore::default());
        store.fail_create_with("Erreur 500");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = DataLoader::new(store.clone(), tx);

        loader.submit_new_bill(new_bill(), receipt()).await;

        assert_eq!(
            rx.recv().await,
            Some(DataEvent::NewBillFailed {
                error: "Erreur 500".to_string()
            })
        );
        assert_eq!(store.calls().len(), 1);
    }
}
