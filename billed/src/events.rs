use crate::routes::Route;
use crate::state::bills::ReviewDecision;
use crate::state::dashboard::BucketId;
use billed_api::endpoints::{bills::Bill, BillId};

/// Commands to execute (user actions → background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,

    // Navigation
    Navigate(Route),
    NavigateBack,

    // Data loading
    LoadBills,

    // Dashboard
    ToggleBucket(BucketId),
    OpenBillDetail {
        bill_id: BillId,
    },
    ReviewBill {
        bill_id: BillId,
        decision: ReviewDecision,
    },
    ShowReceipt {
        bill_id: BillId,
    },
    DismissModal,

    // Admin comment (`commentary2`)
    EnterCommentMode,
    ExitCommentMode,
    AppendCommentChar(char),
    DeleteCommentChar,

    // New bill form
    NavigateFormField {
        forward: bool,
    },
    AppendFormFieldChar {
        c: char,
    },
    DeleteFormFieldChar,
    CycleExpenseType {
        forward: bool,
    },
    ChangeFile,
    SubmitNewBill,

    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    BillsLoaded {
        bills: Vec<Bill>,
    },
    BillsLoadFailed {
        error: String,
    },

    // Dashboard review
    BillUpdated {
        bill: Bill,
    },
    BillUpdateFailed {
        bill_id: BillId,
        error: String,
    },

    // New bill submission (create then update)
    NewBillSubmitted {
        bill: Bill,
    },
    NewBillFailed {
        error: String,
    },
}
