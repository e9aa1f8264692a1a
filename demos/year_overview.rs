/// dormitory year overview with leave months and an injected clock
use billing_reconcile_rs::{
    BillableEntity, EventStore, LeaveRegister, Money, PaymentRecord, PaymentState, Period,
    Reconciler, SafeTimeProvider, TimeSource,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // boarder checked in mid-march, 300,000 per month due on the 10th
    let entity = BillableEntity::dormitory(
        "Ben Santoso",
        Money::from_major(300_000),
        10,
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        None,
    )?;

    // away for july
    let mut leaves = LeaveRegister::new();
    let mut events = EventStore::new();
    leaves.record(
        entity.id,
        Period::new(2024, 7)?,
        Some("semester break".to_string()),
        &mut events,
    )?;

    let payments = vec![PaymentRecord::builder()
        .entity_id(entity.id)
        .period(Period::new(2024, 3)?)
        .billed_amount(Money::from_major(300_000))
        .paid_amount(Money::from_major(300_000))
        .state(PaymentState::Completed)
        .build()?];

    // dashboards reconcile against an injected clock
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 8, 1, 9, 0, 0).unwrap(),
    ));
    let reconciler = Reconciler::new(&time);
    let statement = reconciler.resolve_year(&entity, &payments, &leaves, 2024);

    for month in statement.months() {
        let note = month
            .leave_reason
            .as_deref()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        println!("{:<14} {:?}{}", month.period.to_string(), month.status, note);
    }
    println!("{} months overdue", statement.months_overdue());

    Ok(())
}
