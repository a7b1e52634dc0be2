use crate::case::Case;
use crate::config::{AllocationConfig, ExactPayoffPolicy};
use crate::decimal::Money;
use crate::events::{Event, EventStore};
use crate::payee::Payee;
use crate::types::{CheckNumber, OverpaymentRecord};

/// result of applying funds to a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// the case took the whole amount
    Absorbed,
    /// the case was paid off; carries what it could not take
    Overpaid(Money),
}

/// apply `amount` to one case, settling it if the payment overshoots
pub fn apply_to_case(
    case: &mut Case,
    amount: Money,
    check_number: CheckNumber,
    config: &AllocationConfig,
    events: &mut EventStore,
) -> CaseOutcome {
    let overpayment = case.balance.apply_payment(amount);

    if overpayment.is_positive() {
        case.balance.mark_paid();
        case.mark_paid();

        let applied = amount - overpayment;
        case.record_transaction(check_number, applied);

        events.emit(Event::PaymentApplied {
            case: case.number.clone(),
            check_number,
            amount: applied,
        });
        events.emit(Event::CasePaidOff {
            case: case.number.clone(),
            overpayment,
        });

        return CaseOutcome::Overpaid(overpayment);
    }

    case.record_transaction(check_number, amount);
    events.emit(Event::PaymentApplied {
        case: case.number.clone(),
        check_number,
        amount,
    });

    // exact payoff: nothing owed, nothing over
    if case.balance.owed.is_zero() {
        if config.exact_payoff == ExactPayoffPolicy::MarkPaid {
            case.mark_paid();
        }
        events.emit(Event::CaseSettledExactly {
            case: case.number.clone(),
        });
    }

    CaseOutcome::Absorbed
}

/// the whole payment goes to the payee's only case
pub fn allocate_single(
    payee: &mut Payee,
    check_number: CheckNumber,
    config: &AllocationConfig,
    events: &mut EventStore,
) {
    let payment = payee.payment_amount;
    let Some(case) = payee.cases.first_mut() else {
        return;
    };

    if let CaseOutcome::Overpaid(refund) = apply_to_case(case, payment, check_number, config, events) {
        payee.refund = Some(refund);
        payee.overpayment = Some(OverpaymentRecord::against_case(&case.number, &case.balance, refund));

        events.emit(Event::RefundIssued {
            payee: payee.id,
            amount: refund,
            case_reference: case.number.to_string(),
        });
    }
}

/// apply the payment oldest case first, carrying any overpayment to the next case
///
/// Each overpaid case flags the carried amount as a provisional refund. The first
/// case that absorbs the carried amount clears that refund and ends the run; later
/// cases are not touched. If every case overpays, the last carried amount is the
/// payee's refund.
pub fn allocate_waterfall(
    payee: &mut Payee,
    check_number: CheckNumber,
    config: &AllocationConfig,
    events: &mut EventStore,
) {
    let mut remaining = payee.payment_amount;

    for case in payee.cases.iter_mut() {
        match apply_to_case(case, remaining, check_number, config, events) {
            CaseOutcome::Overpaid(carry) => {
                remaining = carry;
                payee.refund = Some(carry);
                events.emit(Event::RefundFlagged {
                    case: case.number.clone(),
                    amount: carry,
                });
            }
            CaseOutcome::Absorbed => {
                if payee.refund.is_some_and(|r| r.is_positive()) {
                    events.emit(Event::RefundCleared {
                        case: case.number.clone(),
                    });
                }
                payee.refund = Some(Money::ZERO);
                return;
            }
        }
    }

    // every case overpaid; the carried remainder is a true refund
    if let Some(last) = payee.cases.last() {
        payee.refund = Some(remaining);
        payee.overpayment = Some(OverpaymentRecord::against_case(&last.number, &last.balance, remaining));

        events.emit(Event::RefundIssued {
            payee: payee.id,
            amount: remaining,
            case_reference: last.number.to_string(),
        });
    }
}
