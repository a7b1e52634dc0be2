//! Import of ledger service figures into case balances.
//!
//! The ledger reports one line per debt type on a case; the case balance is the
//! column sum of those lines. Fetching the lines is the caller's job.

use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::balance::Balance;
use crate::case::Case;
use crate::decimal::Money;
use crate::errors::{AllocationError, Result};
use crate::types::{CaseNumber, CaseStatus};

/// one debt-type line as reported by the ledger service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_type: Option<String>,
    #[serde(alias = "Total Owed")]
    pub total_owed: Money,
    #[serde(alias = "Total Collected")]
    pub total_collected: Money,
    #[serde(alias = "Total Outstanding")]
    pub total_outstanding: Money,
}

impl LedgerLine {
    pub fn new(total_owed: Money, total_collected: Money, total_outstanding: Money) -> Self {
        Self {
            debt_type: None,
            total_owed,
            total_collected,
            total_outstanding,
        }
    }
}

/// every ledger line reported for one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub case_number: CaseNumber,
    #[serde(default)]
    pub lines: Vec<LedgerLine>,
}

impl LedgerAccount {
    pub fn new(case_number: impl Into<CaseNumber>, lines: Vec<LedgerLine>) -> Self {
        Self {
            case_number: case_number.into(),
            lines,
        }
    }

    pub fn balance(&self) -> Option<Balance> {
        Balance::from_ledger_lines(&self.lines)
    }

    /// build the case, active while anything is still owed
    pub fn into_case(self) -> Result<Case> {
        let balance = self.balance().ok_or_else(|| AllocationError::LedgerAccountEmpty {
            case: self.case_number.clone(),
        })?;

        let mut case = Case::new(self.case_number, balance);
        case.status = status_for(&balance);
        Ok(case)
    }
}

impl Balance {
    /// sum the ledger columns; `None` when the ledger had nothing for the case
    pub fn from_ledger_lines(lines: &[LedgerLine]) -> Option<Balance> {
        if lines.is_empty() {
            return None;
        }

        Some(Balance::new(
            lines.iter().map(|l| l.total_owed).sum::<Money>(),
            lines.iter().map(|l| l.total_collected).sum::<Money>(),
            lines.iter().map(|l| l.total_outstanding).sum::<Money>(),
        ))
    }
}

fn status_for(balance: &Balance) -> CaseStatus {
    if balance.owed.is_positive() {
        CaseStatus::Active
    } else {
        CaseStatus::Paid
    }
}

/// cases that can take a payment, in the order given
///
/// Accounts without ledger lines are skipped, as are cases the ledger already
/// shows as paid.
pub fn import_active_cases(accounts: impl IntoIterator<Item = LedgerAccount>) -> Vec<Case> {
    let mut cases = Vec::new();

    for account in accounts {
        let number = account.case_number.clone();
        match account.into_case() {
            Ok(case) if case.is_active() => {
                debug!(case = %number, owed = %case.balance.owed, "imported active case");
                cases.push(case);
            }
            Ok(_) => {
                debug!(case = %number, "case already paid, skipping");
            }
            Err(e) => {
                warn!(case = %number, error = %e, "no ledger balance, skipping case");
            }
        }
    }

    cases
}

impl Case {
    /// supersede the balance with a fresh ledger figure
    pub fn reconcile(&mut self, account: &LedgerAccount, time_provider: &SafeTimeProvider) -> Result<()> {
        if account.case_number != self.number {
            return Err(AllocationError::CaseNumberMismatch {
                expected: self.number.clone(),
                found: account.case_number.clone(),
            });
        }

        let balance = account.balance().ok_or_else(|| AllocationError::LedgerAccountEmpty {
            case: account.case_number.clone(),
        })?;

        if balance != self.balance {
            debug!(
                case = %self.number,
                old_owed = %self.balance.owed,
                new_owed = %balance.owed,
                "ledger balance changed"
            );
        }

        self.supersede_balance(balance, "ledger reconciliation", time_provider.now());
        self.status = status_for(&balance);
        Ok(())
    }
}
