//! Allocation of one check payment across a payee's cases.
//!
//! The variant is chosen from the number of cases alone: no cases refunds the
//! payment, one case takes it directly, several cases are paid oldest first
//! with any overpayment carried forward. The engine only mutates the payee it
//! is handed and performs no I/O.

pub mod refund;
pub mod waterfall;

#[cfg(test)]
mod props;

use serde::{Deserialize, Serialize};

use crate::config::AllocationConfig;
use crate::events::EventStore;
use crate::payee::Payee;
use crate::types::CheckNumber;

pub use waterfall::{apply_to_case, CaseOutcome};

/// allocation strategy for a payee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationVariant {
    /// nothing owed anywhere, refund the payment
    NoActiveCases,
    /// pay the only case
    SingleCase,
    /// oldest-first waterfall
    MultipleCases,
}

impl AllocationVariant {
    pub fn for_case_count(count: usize) -> Self {
        match count {
            0 => AllocationVariant::NoActiveCases,
            1 => AllocationVariant::SingleCase,
            _ => AllocationVariant::MultipleCases,
        }
    }

    pub fn for_payee(payee: &Payee) -> Self {
        Self::for_case_count(payee.cases.len())
    }
}

/// payment allocator
#[derive(Debug, Clone, Default)]
pub struct PaymentAllocator {
    config: AllocationConfig,
}

impl PaymentAllocator {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// allocate the payee's payment under `check_number`
    pub fn allocate(&self, payee: Payee, check_number: CheckNumber) -> Payee {
        self.allocate_with_events(payee, check_number, &mut EventStore::new())
    }

    /// allocate, recording what happened to each case
    ///
    /// Outputs of any earlier run (transactions, refund, overpayment record) are
    /// discarded first, so one call always describes exactly one payment.
    pub fn allocate_with_events(
        &self,
        mut payee: Payee,
        check_number: CheckNumber,
        events: &mut EventStore,
    ) -> Payee {
        payee.check_number = Some(check_number);
        payee.refund = None;
        payee.overpayment = None;
        for case in payee.cases.iter_mut() {
            case.transaction = None;
        }

        match AllocationVariant::for_payee(&payee) {
            AllocationVariant::NoActiveCases => {
                refund::refund_in_full(&mut payee, &self.config, events);
            }
            AllocationVariant::SingleCase => {
                waterfall::allocate_single(&mut payee, check_number, &self.config, events);
            }
            AllocationVariant::MultipleCases => {
                waterfall::allocate_waterfall(&mut payee, check_number, &self.config, events);
            }
        }

        payee
    }
}

/// allocate with the default strict configuration
pub fn allocate(payee: Payee, check_number: CheckNumber) -> Payee {
    PaymentAllocator::default().allocate(payee, check_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Balance;
    use crate::case::Case;
    use crate::decimal::Money;
    use crate::events::Event;
    use crate::types::{CaseStatus, Transaction};

    const CHECK: CheckNumber = 57_686;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn oldest_case() -> Case {
        Case::new("16-CV-345", Balance::new(Money::from_major(805), cents(64_435), cents(16_065)))
    }

    fn newest_case() -> Case {
        Case::new("21-CV-12", Balance::new(Money::from_major(350), Money::ZERO, cents(35_000)))
    }

    fn payee(payment: Money) -> Payee {
        Payee::new(1234, "Bob Smith", payment).unwrap()
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(AllocationVariant::for_case_count(0), AllocationVariant::NoActiveCases);
        assert_eq!(AllocationVariant::for_case_count(1), AllocationVariant::SingleCase);
        assert_eq!(AllocationVariant::for_case_count(2), AllocationVariant::MultipleCases);
        assert_eq!(AllocationVariant::for_case_count(17), AllocationVariant::MultipleCases);
    }

    #[test]
    fn test_single_case_overpaid() {
        let p = allocate(payee(cents(17_287)).with_case(oldest_case()), CHECK);
        let case = &p.cases[0];

        assert_eq!(case.balance.owed, Money::ZERO);
        assert_eq!(case.balance.collected, Money::from_major(805));
        assert_eq!(case.status, CaseStatus::Paid);
        assert_eq!(case.transaction, Some(Transaction::new(CHECK, cents(16_065))));
        assert_eq!(p.refund, Some(cents(1_222)));

        let record = p.overpayment.as_ref().unwrap();
        assert!(record.exists);
        assert_eq!(record.case_reference, "16-CV-345");
        assert_eq!(record.assessed, Money::from_major(805));
        assert_eq!(record.collected, Money::from_major(805));
        assert_eq!(record.owed, Money::ZERO);
        assert_eq!(record.transaction_amount, cents(-1_222));
        assert!(p.is_conserved());
    }

    #[test]
    fn test_single_case_normal_payment() {
        let p = allocate(payee(cents(12_634)).with_case(oldest_case()), CHECK);
        let case = &p.cases[0];

        assert_eq!(case.balance.owed, cents(3_431));
        assert_eq!(case.balance.collected, cents(77_069));
        assert_eq!(case.status, CaseStatus::Active);
        assert_eq!(case.amount_applied(), cents(12_634));
        assert_eq!(p.refund_amount(), Money::ZERO);
        assert!(p.overpayment.is_none());
        assert!(p.is_conserved());
    }

    #[test]
    fn test_single_case_exact_payoff_stays_active() {
        let p = allocate(payee(cents(16_065)).with_case(oldest_case()), CHECK);
        let case = &p.cases[0];

        assert_eq!(case.balance.owed, Money::ZERO);
        assert_eq!(case.balance.collected, Money::from_major(805));
        assert_eq!(case.status, CaseStatus::Active);
        assert!(p.refund.is_none());
        assert!(p.overpayment.is_none());
    }

    #[test]
    fn test_single_case_exact_payoff_marked_paid_when_configured() {
        let allocator = PaymentAllocator::new(AllocationConfig::settle_on_exact_payoff());
        let p = allocator.allocate(payee(cents(16_065)).with_case(oldest_case()), CHECK);

        assert_eq!(p.cases[0].status, CaseStatus::Paid);
        assert!(p.refund.is_none());
        assert!(p.is_conserved());
    }

    #[test]
    fn test_no_active_cases() {
        let p = allocate(payee(Money::from_major(50)), CHECK);

        assert_eq!(p.refund, Some(Money::from_major(50)));
        let record = p.overpayment.as_ref().unwrap();
        assert!(record.exists);
        assert_eq!(record.case_reference, "No Active Cases");
        assert_eq!(record.transaction_amount, Money::from_major(-50));
        assert_eq!(record.assessed, Money::ZERO);
        assert_eq!(record.collected, Money::ZERO);
        assert_eq!(record.owed, Money::ZERO);
        assert!(p.cases.is_empty());
        assert!(p.is_conserved());
    }

    #[test]
    fn test_multiple_cases_oldest_paid_remainder_carried() {
        let p = allocate(
            payee(cents(17_832)).with_case(oldest_case()).with_case(newest_case()),
            CHECK,
        );
        let (oldest, newest) = (&p.cases[0], &p.cases[1]);

        assert_eq!(oldest.balance.owed, Money::ZERO);
        assert_eq!(oldest.balance.collected, Money::from_major(805));
        assert_eq!(oldest.status, CaseStatus::Paid);
        assert_eq!(oldest.amount_applied(), cents(16_065));

        assert_eq!(newest.balance.owed, cents(33_233));
        assert_eq!(newest.balance.collected, cents(1_767));
        assert_eq!(newest.status, CaseStatus::Active);
        assert_eq!(newest.amount_applied(), cents(1_767));

        assert_eq!(p.refund, Some(Money::ZERO));
        assert!(p.overpayment.is_none());
        assert!(p.is_conserved());
    }

    #[test]
    fn test_multiple_cases_all_paid_with_refund() {
        let p = allocate(
            payee(Money::from_major(525)).with_case(oldest_case()).with_case(newest_case()),
            CHECK,
        );
        let (oldest, newest) = (&p.cases[0], &p.cases[1]);

        assert_eq!(oldest.balance.owed, Money::ZERO);
        assert_eq!(oldest.amount_applied(), cents(16_065));
        assert_eq!(newest.balance.owed, Money::ZERO);
        assert_eq!(newest.balance.collected, Money::from_major(350));
        assert_eq!(newest.amount_applied(), Money::from_major(350));
        assert!(oldest.is_paid() && newest.is_paid());

        assert_eq!(p.refund, Some(cents(1_435)));
        let record = p.overpayment.as_ref().unwrap();
        assert_eq!(record.case_reference, "21-CV-12");
        assert_eq!(record.transaction_amount, cents(-1_435));
        assert!(p.is_conserved());
    }

    #[test]
    fn test_multiple_cases_payment_short_of_oldest() {
        let p = allocate(
            payee(cents(459)).with_case(oldest_case()).with_case(newest_case()),
            CHECK,
        );
        let (oldest, newest) = (&p.cases[0], &p.cases[1]);

        assert_eq!(oldest.balance.owed, cents(15_606));
        assert_eq!(oldest.balance.collected, cents(64_894));
        assert_eq!(oldest.amount_applied(), cents(459));
        assert!(oldest.is_active());

        assert_eq!(newest.balance.owed, cents(35_000));
        assert_eq!(newest.balance.collected, Money::ZERO);
        assert!(newest.transaction.is_none());

        assert_eq!(p.refund_amount(), Money::ZERO);
        assert!(p.is_conserved());
    }

    #[test]
    fn test_three_cases_stop_at_first_absorbing_case() {
        let p = payee(cents(84_637))
            .with_case(Case::new(
                "06-CV-608",
                Balance::new(Money::from_major(805), cents(9_128), cents(71_372)),
            ))
            .with_case(Case::new(
                "07-CV-484",
                Balance::new(Money::from_major(350), cents(150), cents(34_850)),
            ))
            .with_case(Case::new(
                "12-CV-646",
                Balance::new(Money::from_major(855), Money::ZERO, Money::from_major(855)),
            ));

        let p = allocate(p, CHECK);

        assert!(p.cases[0].is_paid());
        assert_eq!(p.cases[0].amount_applied(), cents(71_372));
        assert_eq!(p.cases[1].amount_applied(), cents(13_265));
        assert_eq!(p.cases[1].balance.collected, cents(13_415));
        assert_eq!(p.cases[1].balance.owed, cents(21_585));
        assert!(p.cases[2].transaction.is_none());
        assert_eq!(p.cases[2].balance.owed, Money::from_major(855));
        assert_eq!(p.refund, Some(Money::ZERO));
        assert!(p.is_conserved());
    }

    #[test]
    fn test_already_settled_cases_route_everything_to_refund() {
        let settled = |n: &str| Case::new(n, Balance::outstanding(Money::from_major(350), Money::from_major(350)));
        let p = allocate(
            payee(cents(52_887)).with_case(settled("13-CV-193")).with_case(settled("14-CV-135")),
            CHECK,
        );

        for case in &p.cases {
            assert_eq!(case.balance.owed, Money::ZERO);
            assert_eq!(case.amount_applied(), Money::ZERO);
        }
        assert_eq!(p.refund, Some(cents(52_887)));
        let record = p.overpayment.as_ref().unwrap();
        assert_eq!(record.case_reference, "14-CV-135");
        assert_eq!(record.collected, Money::from_major(350));
        assert_eq!(record.transaction_amount, cents(-52_887));
    }

    #[test]
    fn test_reallocating_a_paid_case_leaves_no_negative_balance() {
        let first = allocate(payee(cents(17_287)).with_case(oldest_case()), CHECK);
        assert!(first.cases[0].is_paid());

        let mut again = first.clone();
        again.payment_amount = Money::from_major(20);
        let again = allocate(again, CHECK + 1);
        let case = &again.cases[0];

        assert_eq!(case.balance.owed, Money::ZERO);
        assert_eq!(case.balance.collected, Money::from_major(805));
        assert_eq!(case.transaction, Some(Transaction::new(CHECK + 1, Money::ZERO)));
        assert_eq!(again.refund, Some(Money::from_major(20)));
        assert!(again.is_conserved());
    }

    #[test]
    fn test_case_order_preserved() {
        let p = allocate(
            payee(Money::from_major(525)).with_case(newest_case()).with_case(oldest_case()),
            CHECK,
        );
        let numbers: Vec<_> = p.cases.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["21-CV-12", "16-CV-345"]);
        // input order is the precedence, so the newer case is settled first here
        assert_eq!(p.cases[0].amount_applied(), Money::from_major(350));
    }

    #[test]
    fn test_waterfall_events() {
        let mut events = EventStore::new();
        let p = PaymentAllocator::default().allocate_with_events(
            payee(cents(17_832)).with_case(oldest_case()).with_case(newest_case()),
            CHECK,
            &mut events,
        );

        assert_eq!(p.check_number, Some(CHECK));
        assert_eq!(
            events.events(),
            &[
                Event::PaymentApplied {
                    case: "16-CV-345".into(),
                    check_number: CHECK,
                    amount: cents(16_065),
                },
                Event::CasePaidOff {
                    case: "16-CV-345".into(),
                    overpayment: cents(1_767),
                },
                Event::RefundFlagged {
                    case: "16-CV-345".into(),
                    amount: cents(1_767),
                },
                Event::PaymentApplied {
                    case: "21-CV-12".into(),
                    check_number: CHECK,
                    amount: cents(1_767),
                },
                Event::RefundCleared {
                    case: "21-CV-12".into(),
                },
            ]
        );
    }
}
