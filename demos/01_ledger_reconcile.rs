/// ledger reconcile - build cases from ledger figures, allocate, then re-sync
use chrono::{Duration, TimeZone, Utc};
use plra_payments_rs::{
    allocate, import_active_cases, LedgerAccount, LedgerLine, Money, Payee, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== ledger reconcile ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 15, 8, 30, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    // ledger figures arrive as json, one line per debt type
    let accounts: Vec<LedgerAccount> = serde_json::from_str(r#"[
        {"case_number": "13-cv-193", "lines": [
            {"Total Owed": "350.00", "Total Collected": "350.00", "Total Outstanding": "0.00"}
        ]},
        {"case_number": "16-cv-345", "lines": [
            {"debt_type": "filing fee", "Total Owed": "350.00", "Total Collected": "300.00", "Total Outstanding": "50.00"},
            {"debt_type": "appeal fee", "Total Owed": "455.00", "Total Collected": "344.35", "Total Outstanding": "110.65"}
        ]},
        {"case_number": "19-cv-77", "lines": []},
        {"case_number": "21-cv-12", "lines": [
            {"Total Owed": "350.00", "Total Collected": "0.00", "Total Outstanding": "350.00"}
        ]}
    ]"#)?;

    let cases = import_active_cases(accounts);
    println!("{} active cases imported", cases.len());

    let mut payee = Payee::from_check_line(1234, "Bob Smith", "178.32")?;
    for case in cases {
        payee.push_case(case);
    }

    let mut payee = allocate(payee, 57_686);
    for case in &payee.cases {
        println!(
            "  {:<12} {:<6} applied {:>8}  owed {}",
            case.number,
            case.status,
            case.amount_applied(),
            case.balance.owed,
        );
    }
    println!("  refund {}\n", payee.refund_amount());

    // a day later the ledger reports the posted payment
    controller.advance(Duration::days(1));
    let fresh = LedgerAccount::new(
        "21-CV-12",
        vec![LedgerLine::new(Money::from_major(350), "17.67".parse()?, "332.33".parse()?)],
    );
    if let Some(case) = payee.cases.iter_mut().find(|c| c.number == fresh.case_number) {
        case.reconcile(&fresh, &time)?;
        println!(
            "{} reconciled, {} earlier snapshot(s), owed {}",
            case.number,
            case.history.len(),
            case.balance.owed,
        );
    }

    Ok(())
}
