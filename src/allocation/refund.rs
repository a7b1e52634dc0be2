use crate::config::AllocationConfig;
use crate::events::{Event, EventStore};
use crate::payee::Payee;
use crate::types::OverpaymentRecord;

/// no active debt: the entire payment is refunded
pub fn refund_in_full(payee: &mut Payee, config: &AllocationConfig, events: &mut EventStore) {
    let refund = payee.payment_amount;

    payee.refund = Some(refund);
    payee.overpayment = Some(OverpaymentRecord::without_case(
        config.no_active_cases_reference.as_str(),
        refund,
    ));

    events.emit(Event::RefundIssued {
        payee: payee.id,
        amount: refund,
        case_reference: config.no_active_cases_reference.clone(),
    });
}
