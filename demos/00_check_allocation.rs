/// check allocation - one state check, three payees, every allocation variant
use chrono::{NaiveDate, TimeZone, Utc};
use plra_payments_rs::{
    Balance, Case, CheckBatch, EventStore, Money, Payee, PaymentAllocator, SafeTimeProvider,
    TimeSource, UploadLine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== check allocation ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 15, 8, 30, 0).unwrap()
    ));
    let check_date = NaiveDate::from_ymd_opt(2024, 4, 12).ok_or("bad check date")?;

    let mut batch = CheckBatch::new(57_686, check_date);

    // two cases, oldest first: the older one is paid off, the rest carries forward
    batch.add_payee(
        Payee::from_check_line(1234, "Bob Smith", "178.32")?
            .with_case(Case::new("16-CV-345", Balance::new(
                Money::from_major(805),
                "644.35".parse()?,
                "160.65".parse()?,
            )))
            .with_case(Case::new("21-CV-12", Balance::outstanding(
                Money::from_major(350),
                Money::ZERO,
            ))),
    )?;

    // one case, paid more than is owed
    batch.add_payee(
        Payee::from_check_line(2210, "Ann Jones", "172.87")?
            .with_case(Case::new("19-CV-88", Balance::new(
                Money::from_major(805),
                "644.35".parse()?,
                "160.65".parse()?,
            ))),
    )?;

    // no active cases at all
    batch.add_payee(Payee::from_check_line(777, "Walter W Blanck", "50.00")?)?;

    let mut events = EventStore::new();
    let report = batch.process(&PaymentAllocator::default(), &time, &mut events);

    println!("check {} dated {}", report.check_number, report.check_date);
    println!("  paid:     {}", report.total_paid);
    println!("  applied:  {}", report.total_applied);
    println!("  refunded: {}", report.total_refunded);
    println!("  balanced: {}\n", report.is_balanced());

    println!("upload lines");
    println!("------------");
    for line in report.upload_lines() {
        match line {
            UploadLine::Transaction { payee_name, case_number, amount, owed, .. } => {
                println!("  {payee_name:<20} {case_number:<12} {amount:>10}  owed {owed}");
            }
            UploadLine::Refund { payee_name, case_reference, transaction_amount, .. } => {
                println!("  {payee_name:<20} {case_reference:<12} {transaction_amount:>10}  refund");
            }
        }
    }

    println!("\n{} events recorded", events.len());
    println!("\n{}", report.to_json_pretty()?);

    Ok(())
}
