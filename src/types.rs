use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::balance::Balance;
use crate::decimal::Money;

/// number printed on the incoming state check
pub type CheckNumber = u64;

/// agency tracking number of the payee (department of corrections number)
pub type PayeeId = u64;

/// unique identifier for one processed check
pub type BatchId = Uuid;

/// court case number, e.g. `16-CV-345`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CaseNumber(String);

impl CaseNumber {
    /// case numbers are stored upper-cased
    pub fn new(number: impl AsRef<str>) -> Self {
        CaseNumber(number.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CaseNumber {
    fn from(s: &str) -> Self {
        CaseNumber::new(s)
    }
}

impl From<String> for CaseNumber {
    fn from(s: String) -> Self {
        CaseNumber::new(s)
    }
}

impl From<CaseNumber> for String {
    fn from(n: CaseNumber) -> Self {
        n.0
    }
}

/// case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// debt still outstanding
    Active,
    /// fully collected
    Paid,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Active => f.pad("ACTIVE"),
            CaseStatus::Paid => f.pad("PAID"),
        }
    }
}

/// funds applied to one case during one allocation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub check_number: CheckNumber,
    pub amount_paid: Money,
}

impl Transaction {
    pub fn new(check_number: CheckNumber, amount_paid: Money) -> Self {
        Self {
            check_number,
            amount_paid,
        }
    }
}

/// payee-level record of money that could not be applied to any case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverpaymentRecord {
    pub exists: bool,
    pub case_reference: String,
    pub assessed: Money,
    pub collected: Money,
    pub owed: Money,
    /// negative of the refund
    pub transaction_amount: Money,
}

impl OverpaymentRecord {
    /// refund against the final balances of the case that overflowed
    pub fn against_case(case_reference: &CaseNumber, balance: &Balance, refund: Money) -> Self {
        Self {
            exists: true,
            case_reference: case_reference.to_string(),
            assessed: balance.assessed,
            collected: balance.collected,
            owed: balance.owed,
            transaction_amount: -refund,
        }
    }

    /// refund of a payment that had no case to land on
    pub fn without_case(case_reference: impl Into<String>, refund: Money) -> Self {
        Self {
            exists: true,
            case_reference: case_reference.into(),
            assessed: Money::ZERO,
            collected: Money::ZERO,
            owed: Money::ZERO,
            transaction_amount: -refund,
        }
    }

    pub fn refund(&self) -> Money {
        -self.transaction_amount
    }
}
