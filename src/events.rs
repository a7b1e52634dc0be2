use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{BatchId, CaseNumber, CheckNumber, PayeeId};

/// audit trail of what an allocation run did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // case events
    PaymentApplied {
        case: CaseNumber,
        check_number: CheckNumber,
        amount: Money,
    },
    CasePaidOff {
        case: CaseNumber,
        overpayment: Money,
    },
    CaseSettledExactly {
        case: CaseNumber,
    },

    // refund events
    RefundFlagged {
        case: CaseNumber,
        amount: Money,
    },
    RefundCleared {
        case: CaseNumber,
    },
    RefundIssued {
        payee: PayeeId,
        amount: Money,
        case_reference: String,
    },

    // check events
    BatchProcessed {
        batch_id: BatchId,
        check_number: CheckNumber,
        check_date: NaiveDate,
        payees: usize,
        total_applied: Money,
        total_refunded: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
