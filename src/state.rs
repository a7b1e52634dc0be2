use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::balance::Balance;

/// balance snapshot kept when a fresher ledger figure supersedes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub snapshot_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub balance: Balance,
    pub trigger: String,
}

impl BalanceSnapshot {
    pub fn capture(balance: &Balance, trigger: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            timestamp,
            balance: *balance,
            trigger: trigger.into(),
        }
    }
}
