use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// assessed/collected/owed ledger entry for one case
///
/// `owed` normally equals `assessed - collected`. Right after a payment that
/// overshoots, `owed` is left negative to carry the overpayment magnitude until
/// [`Balance::mark_paid`] normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub assessed: Money,
    pub collected: Money,
    pub owed: Money,
}

impl Balance {
    /// take ledger figures verbatim
    pub fn new(assessed: Money, collected: Money, owed: Money) -> Self {
        Self {
            assessed,
            collected,
            owed,
        }
    }

    /// derive owed from assessed and collected
    pub fn outstanding(assessed: Money, collected: Money) -> Self {
        Self::new(assessed, collected, assessed - collected)
    }

    /// apply funds; returns the overshoot if the payment exceeded what was owed
    pub fn apply_payment(&mut self, amount: Money) -> Money {
        self.collected += amount;
        self.owed = self.assessed - self.collected;

        if self.owed.is_negative() {
            self.owed.abs()
        } else {
            Money::ZERO
        }
    }

    /// settle the balance; returns the overpayment that was carried in `owed`
    pub fn mark_paid(&mut self) -> Money {
        self.collected = self.assessed;
        let overpayment = self.owed.abs();
        self.owed = Money::ZERO;
        overpayment
    }

    pub fn is_overpaid(&self) -> bool {
        self.owed.is_negative()
    }

    pub fn is_settled(&self) -> bool {
        !self.owed.is_positive()
    }
}
