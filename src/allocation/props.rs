//! Property tests for the allocation engine.
//!
//! - payment is conserved: applied + refunded == paid, to the cent
//! - no case is left with a negative owed amount
//! - case order is never permuted
//! - the variant depends on the case count only

use proptest::prelude::*;

use super::{allocate, AllocationVariant};
use crate::balance::Balance;
use crate::case::Case;
use crate::decimal::Money;
use crate::payee::Payee;

/// amounts from 0.00 to 5,000.00
fn amount() -> impl Strategy<Value = Money> {
    (0i64..500_000i64).prop_map(Money::from_cents)
}

/// a case with collected <= assessed
fn case() -> impl Strategy<Value = (Money, Money)> {
    (0i64..200_000i64).prop_flat_map(|assessed| {
        (0i64..=assessed).prop_map(move |collected| (Money::from_cents(assessed), Money::from_cents(collected)))
    })
}

fn payee_with_cases(payment: Money, balances: &[(Money, Money)]) -> Payee {
    let mut payee = Payee::new(42, "Test Payee", payment).unwrap();
    for (i, (assessed, collected)) in balances.iter().enumerate() {
        payee.push_case(Case::new(
            format!("{:02}-CV-{}", i + 10, i),
            Balance::outstanding(*assessed, *collected),
        ));
    }
    payee
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_payment_is_conserved(
        payment in amount(),
        balances in prop::collection::vec(case(), 0..6),
    ) {
        let payee = allocate(payee_with_cases(payment, &balances), 1);
        prop_assert_eq!(payee.total_applied() + payee.refund_amount(), payment);
    }

    #[test]
    fn prop_owed_never_negative_after_allocation(
        payment in amount(),
        balances in prop::collection::vec(case(), 1..6),
    ) {
        let payee = allocate(payee_with_cases(payment, &balances), 1);
        for case in &payee.cases {
            prop_assert!(!case.balance.owed.is_negative());
            prop_assert_eq!(case.balance.owed, (case.balance.assessed - case.balance.collected).max(Money::ZERO));
        }
    }

    #[test]
    fn prop_case_order_preserved(
        payment in amount(),
        balances in prop::collection::vec(case(), 0..6),
    ) {
        let before = payee_with_cases(payment, &balances);
        let order: Vec<_> = before.cases.iter().map(|c| c.number.clone()).collect();

        let after = allocate(before, 1);
        let order_after: Vec<_> = after.cases.iter().map(|c| c.number.clone()).collect();
        prop_assert_eq!(order, order_after);
    }

    #[test]
    fn prop_variant_depends_on_count_only(
        first in prop::collection::vec(case(), 0..6),
        second in prop::collection::vec(case(), 0..6),
        payment in amount(),
    ) {
        let a = payee_with_cases(payment, &first);
        let b = payee_with_cases(Money::ZERO, &second);
        prop_assert_eq!(
            AllocationVariant::for_payee(&a) == AllocationVariant::for_payee(&b),
            AllocationVariant::for_case_count(first.len()) == AllocationVariant::for_case_count(second.len())
        );
    }

    #[test]
    fn prop_untouched_cases_follow_absorbing_case(
        payment in amount(),
        balances in prop::collection::vec(case(), 2..6),
    ) {
        let payee = allocate(payee_with_cases(payment, &balances), 1);
        // once a case is skipped, every later case is skipped too
        let first_skipped = payee.cases.iter().position(|c| c.transaction.is_none());
        if let Some(idx) = first_skipped {
            prop_assert!(payee.cases[idx..].iter().all(|c| c.transaction.is_none()));
            prop_assert_eq!(payee.refund_amount(), Money::ZERO);
        }
    }
}
