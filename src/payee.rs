use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::decimal::Money;
use crate::errors::{AllocationError, Result};
use crate::types::{CheckNumber, OverpaymentRecord, PayeeId};

/// one payment line on an incoming check, with the payee's cases oldest first
///
/// Deserialization goes through the same checks as [`Payee::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayeeRecord")]
pub struct Payee {
    pub id: PayeeId,
    pub name: String,
    pub payment_amount: Money,
    pub check_number: Option<CheckNumber>,
    pub cases: Vec<Case>,
    pub overpayment: Option<OverpaymentRecord>,
    pub refund: Option<Money>,
}

impl Payee {
    /// new payee for a check line; the payment may not be negative
    pub fn new(id: PayeeId, name: impl Into<String>, payment_amount: Money) -> Result<Self> {
        if payment_amount.is_negative() {
            return Err(AllocationError::NegativePayment {
                amount: payment_amount,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            payment_amount,
            check_number: None,
            cases: Vec::new(),
            overpayment: None,
            refund: None,
        })
    }

    /// parse the check line amount as printed
    pub fn from_check_line(id: PayeeId, name: impl Into<String>, amount: &str) -> Result<Self> {
        let payment_amount = Money::from_str_exact(amount).map_err(|_| AllocationError::InvalidAmount {
            input: amount.to_string(),
        })?;
        Self::new(id, name, payment_amount)
    }

    /// append a case; callers add cases oldest first
    pub fn with_case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    pub fn push_case(&mut self, case: Case) {
        self.cases.push(case);
    }

    pub fn active_cases(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter().filter(|c| c.is_active())
    }

    /// sum of transaction amounts over every case
    pub fn total_applied(&self) -> Money {
        self.cases.iter().map(Case::amount_applied).sum()
    }

    pub fn refund_amount(&self) -> Money {
        self.refund.unwrap_or(Money::ZERO)
    }

    /// applied plus refunded equals the payment, to the cent
    pub fn is_conserved(&self) -> bool {
        self.total_applied() + self.refund_amount() == self.payment_amount
    }
}

/// wire form of a payee, validated into [`Payee`]
#[derive(Deserialize)]
struct PayeeRecord {
    id: PayeeId,
    name: String,
    payment_amount: Money,
    #[serde(default)]
    check_number: Option<CheckNumber>,
    #[serde(default)]
    cases: Vec<Case>,
    #[serde(default)]
    overpayment: Option<OverpaymentRecord>,
    #[serde(default)]
    refund: Option<Money>,
}

impl TryFrom<PayeeRecord> for Payee {
    type Error = AllocationError;

    fn try_from(record: PayeeRecord) -> Result<Self> {
        let mut payee = Payee::new(record.id, record.name, record.payment_amount)?;
        payee.check_number = record.check_number;
        payee.cases = record.cases;
        payee.overpayment = record.overpayment;
        payee.refund = record.refund;
        Ok(payee)
    }
}
