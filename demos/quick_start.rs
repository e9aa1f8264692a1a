/// quick start - reconcile one student's tuition year
use billing_reconcile_rs::{
    resolve_year, BillableEntity, LeaveRegister, Money, PaymentRecord, PaymentState, Period,
};
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // student billed 500,000 per month, due on the 5th
    let entity = BillableEntity::tuition("Ana Putri", Money::from_major(500_000), 5)?;

    // may fully paid, june partially paid
    let payments = vec![
        PaymentRecord::builder()
            .entity_id(entity.id)
            .period(Period::new(2024, 5)?)
            .billed_amount(Money::from_major(500_000))
            .paid_amount(Money::from_major(500_000))
            .state(PaymentState::Completed)
            .build()?,
        PaymentRecord::builder()
            .entity_id(entity.id)
            .period(Period::new(2024, 6)?)
            .billed_amount(Money::from_major(500_000))
            .paid_amount(Money::from_major(200_000))
            .state(PaymentState::PartiallyPaid)
            .build()?,
    ];

    let leaves = LeaveRegister::new();
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let statement = resolve_year(&entity, &payments, &leaves, 2024, today);

    for month in statement.months() {
        println!(
            "{:<14} {:?}  paid {} of {}",
            month.period.to_string(),
            month.status,
            month.total_paid.grouped(),
            month.required_amount.grouped(),
        );
    }
    println!(
        "year: {}% paid, {} remaining",
        statement.overall_percentage(),
        statement.total_remaining().grouped()
    );

    Ok(())
}
