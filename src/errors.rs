use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CaseNumber, CheckNumber, PayeeId};

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("payment amount cannot be negative: {amount}")]
    NegativePayment {
        amount: Money,
    },

    #[error("invalid amount: {input}")]
    InvalidAmount {
        input: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("check number mismatch: payee stamped with {found}, batch is {expected}")]
    CheckNumberMismatch {
        expected: CheckNumber,
        found: CheckNumber,
    },

    #[error("payee {id} already present on this check")]
    DuplicatePayee {
        id: PayeeId,
    },

    #[error("no ledger lines reported for case {case}")]
    LedgerAccountEmpty {
        case: CaseNumber,
    },

    #[error("ledger account is for case {found}, expected {expected}")]
    CaseNumberMismatch {
        expected: CaseNumber,
        found: CaseNumber,
    },

    #[error("amount overflow: {context}")]
    AmountOverflow {
        context: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AllocationError>;
