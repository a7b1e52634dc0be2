//! Processing of one incoming state check.
//!
//! A check carries one payment line per payee. Every payee is allocated under
//! the check's number and the results are summarized into a report plus the
//! upload lines the ledger service ingests.

use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::allocation::{AllocationVariant, PaymentAllocator};
use crate::decimal::Money;
use crate::errors::{AllocationError, Result};
use crate::events::{Event, EventStore};
use crate::payee::Payee;
use crate::types::{BatchId, CaseNumber, CheckNumber, PayeeId};

/// one check and the payees listed on it
///
/// Deserialization replays [`CheckBatch::add_payee`] for every payee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CheckBatchRecord")]
pub struct CheckBatch {
    pub id: BatchId,
    pub check_number: CheckNumber,
    pub check_date: NaiveDate,
    payees: Vec<Payee>,
}

impl CheckBatch {
    pub fn new(check_number: CheckNumber, check_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            check_number,
            check_date,
            payees: Vec::new(),
        }
    }

    /// add a payee line; a payee may appear once per check
    pub fn add_payee(&mut self, payee: Payee) -> Result<()> {
        if let Some(found) = payee.check_number {
            if found != self.check_number {
                return Err(AllocationError::CheckNumberMismatch {
                    expected: self.check_number,
                    found,
                });
            }
        }

        if self.payees.iter().any(|p| p.id == payee.id) {
            return Err(AllocationError::DuplicatePayee { id: payee.id });
        }

        let amounts = self.payees.iter().chain(std::iter::once(&payee)).map(|p| p.payment_amount);
        if Money::checked_sum(amounts).is_none() {
            return Err(AllocationError::AmountOverflow {
                context: format!("check {} total with payee {}", self.check_number, payee.id),
            });
        }

        self.payees.push(payee);
        Ok(())
    }

    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    /// face value of the check
    pub fn total_paid(&self) -> Money {
        self.payees.iter().map(|p| p.payment_amount).sum()
    }

    /// allocate every payee on the check
    pub fn process(
        self,
        allocator: &PaymentAllocator,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> BatchReport {
        let total_paid = self.total_paid();
        info!(
            batch_id = %self.id,
            check_number = self.check_number,
            payees = self.payees.len(),
            total = %total_paid,
            "processing check"
        );

        let payees: Vec<Payee> = self
            .payees
            .into_iter()
            .map(|payee| {
                let variant = AllocationVariant::for_payee(&payee);
                let payee = allocator.allocate_with_events(payee, self.check_number, events);
                debug!(
                    payee = payee.id,
                    ?variant,
                    paid = %payee.payment_amount,
                    applied = %payee.total_applied(),
                    refund = %payee.refund_amount(),
                    "payee allocated"
                );
                payee
            })
            .collect();

        let total_applied: Money = payees.iter().map(Payee::total_applied).sum();
        let total_refunded: Money = payees.iter().map(Payee::refund_amount).sum();
        let processed_at = time_provider.now();

        events.emit(Event::BatchProcessed {
            batch_id: self.id,
            check_number: self.check_number,
            check_date: self.check_date,
            payees: payees.len(),
            total_applied,
            total_refunded,
            timestamp: processed_at,
        });

        info!(
            batch_id = %self.id,
            applied = %total_applied,
            refunded = %total_refunded,
            "check processed"
        );

        BatchReport {
            batch_id: self.id,
            check_number: self.check_number,
            check_date: self.check_date,
            processed_at,
            payees,
            total_paid,
            total_applied,
            total_refunded,
        }
    }
}

/// wire form of a check, validated into [`CheckBatch`]
#[derive(Deserialize)]
struct CheckBatchRecord {
    id: BatchId,
    check_number: CheckNumber,
    check_date: NaiveDate,
    #[serde(default)]
    payees: Vec<Payee>,
}

impl TryFrom<CheckBatchRecord> for CheckBatch {
    type Error = AllocationError;

    fn try_from(record: CheckBatchRecord) -> Result<Self> {
        let mut batch = CheckBatch::new(record.check_number, record.check_date);
        batch.id = record.id;
        for payee in record.payees {
            batch.add_payee(payee)?;
        }
        Ok(batch)
    }
}

/// allocated check, ready for persistence and upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: BatchId,
    pub check_number: CheckNumber,
    pub check_date: NaiveDate,
    pub processed_at: DateTime<Utc>,
    pub payees: Vec<Payee>,
    pub total_paid: Money,
    pub total_applied: Money,
    pub total_refunded: Money,
}

impl BatchReport {
    /// applied plus refunded equals the check total
    pub fn is_balanced(&self) -> bool {
        self.total_applied + self.total_refunded == self.total_paid
    }

    pub fn refunds(&self) -> impl Iterator<Item = &Payee> {
        self.payees.iter().filter(|p| p.overpayment.is_some())
    }

    /// lines for the ledger upload: each case transaction, then the payee's refund
    pub fn upload_lines(&self) -> Vec<UploadLine> {
        let mut lines = Vec::new();

        for payee in &self.payees {
            for case in &payee.cases {
                if let Some(transaction) = case.transaction {
                    lines.push(UploadLine::Transaction {
                        payee: payee.id,
                        payee_name: payee.name.clone(),
                        case_number: case.number.clone(),
                        amount: transaction.amount_paid,
                        assessed: case.balance.assessed,
                        collected: case.balance.collected,
                        owed: case.balance.owed,
                    });
                }
            }

            if let Some(record) = &payee.overpayment {
                lines.push(UploadLine::Refund {
                    payee: payee.id,
                    payee_name: payee.name.clone(),
                    case_reference: record.case_reference.clone(),
                    transaction_amount: record.transaction_amount,
                    refund: payee.refund_amount(),
                });
            }
        }

        lines
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// one row of the ledger upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadLine {
    Transaction {
        payee: PayeeId,
        payee_name: String,
        case_number: CaseNumber,
        amount: Money,
        assessed: Money,
        collected: Money,
        owed: Money,
    },
    Refund {
        payee: PayeeId,
        payee_name: String,
        case_reference: String,
        transaction_amount: Money,
        refund: Money,
    },
}

impl UploadLine {
    /// signed amount the line moves
    pub fn amount(&self) -> Money {
        match self {
            UploadLine::Transaction { amount, .. } => *amount,
            UploadLine::Refund {
                transaction_amount, ..
            } => *transaction_amount,
        }
    }
}
