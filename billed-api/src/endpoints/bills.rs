use super::{BillId, BillStatus};
use crate::macros::setter;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "BillId::is_empty")]
    pub id: BillId,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// The bill date as a calendar date, if it is a valid `YYYY-MM-DD` string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn is_pending(&self) -> bool {
        self.status == BillStatus::Pending
    }
}

/// A receipt file staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceipt {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListBills;

impl ListBills {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListBills {
    type Data = ();
    type Response = Vec<Bill>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/bills".into()
    }
}

/// Upload a receipt; the store answers with the file URL and the key of the
/// bill record it reserved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBill {
    email: String,
    file_name: String,
    content_type: String,
    file: String,
}

impl CreateBill {
    pub fn new(receipt: NewReceipt) -> Self {
        Self {
            email: String::new(),
            file_name: receipt.file_name,
            content_type: receipt.content_type,
            file: STANDARD.encode(&receipt.bytes),
        }
    }

    setter!(email: String);
}

impl Request for CreateBill {
    type Data = Self;
    type Response = Upload;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/bills".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBill {
    selector: BillId,
    bill: Bill,
}

impl UpdateBill {
    pub fn new(selector: BillId, bill: Bill) -> Self {
        Self { selector, bill }
    }
}

impl Request for UpdateBill {
    type Data = Bill;
    type Response = Bill;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/bills/{}", self.selector).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.bill)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    #[serde(default)]
    pub file_url: String,
    pub key: BillId,
}
