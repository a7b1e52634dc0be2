pub mod allocation;
pub mod balance;
pub mod batch;
pub mod case;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod payee;
pub mod state;
pub mod types;

// re-export key types
pub use allocation::{allocate, AllocationVariant, PaymentAllocator};
pub use balance::Balance;
pub use batch::{BatchReport, CheckBatch, UploadLine};
pub use case::Case;
pub use config::{AllocationConfig, ExactPayoffPolicy};
pub use decimal::Money;
pub use errors::{AllocationError, Result};
pub use events::{Event, EventStore};
pub use ledger::{import_active_cases, LedgerAccount, LedgerLine};
pub use payee::Payee;
pub use state::BalanceSnapshot;
pub use types::{
    BatchId, CaseNumber, CaseStatus, CheckNumber, OverpaymentRecord, PayeeId, Transaction,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
