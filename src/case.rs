use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::balance::Balance;
use crate::decimal::Money;
use crate::state::BalanceSnapshot;
use crate::types::{CaseNumber, CaseStatus, CheckNumber, Transaction};

/// one court-ordered debt owed by a payee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub number: CaseNumber,
    pub status: CaseStatus,
    pub balance: Balance,
    pub transaction: Option<Transaction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<BalanceSnapshot>,
}

impl Case {
    /// new active case with the balance reported by the ledger
    pub fn new(number: impl Into<CaseNumber>, balance: Balance) -> Self {
        Self {
            number: number.into(),
            status: CaseStatus::Active,
            balance,
            transaction: None,
            history: Vec::new(),
        }
    }

    pub fn mark_active(&mut self) {
        self.status = CaseStatus::Active;
    }

    pub fn mark_paid(&mut self) {
        self.status = CaseStatus::Paid;
    }

    pub fn is_active(&self) -> bool {
        self.status == CaseStatus::Active
    }

    pub fn is_paid(&self) -> bool {
        self.status == CaseStatus::Paid
    }

    /// record the funds this run applied to the case
    pub fn record_transaction(&mut self, check_number: CheckNumber, amount: Money) {
        self.transaction = Some(Transaction::new(check_number, amount));
    }

    /// amount applied this run, zero if untouched
    pub fn amount_applied(&self) -> Money {
        self.transaction
            .map(|t| t.amount_paid)
            .unwrap_or(Money::ZERO)
    }

    /// replace the balance with a fresher ledger figure, keeping the old one
    pub fn supersede_balance(&mut self, balance: Balance, reason: &str, timestamp: DateTime<Utc>) {
        self.history
            .push(BalanceSnapshot::capture(&self.balance, reason, timestamp));
        self.balance = balance;
    }
}
