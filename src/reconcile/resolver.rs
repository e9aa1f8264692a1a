use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::decimal::Money;
use crate::entity::BillableEntity;
use crate::leave::LeaveRegister;
use crate::payment::{applicable_payments, primary_payment, total_paid, PaymentRecord};
use crate::reconcile::classify::classify;
use crate::reconcile::statement::YearStatement;
use crate::types::{MonthStatus, PaymentId};

/// the reconciled position of one (entity, month) slot. derived on every
/// read, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatus {
    pub period: Period,
    pub required_amount: Money,
    pub total_paid: Money,
    /// clamped at zero; overpayment never reports a negative remainder
    pub remaining_amount: Money,
    /// rounded whole percentage; 0 when nothing is required
    pub percentage_paid: u32,
    pub status: MonthStatus,
    pub is_leave: bool,
    pub leave_reason: Option<String>,
    pub has_payment: bool,
    /// the open payment to resume paying against, if any
    pub primary_payment: Option<PaymentId>,
}

impl MonthlyStatus {
    fn not_applicable(period: Period) -> Self {
        Self {
            period,
            required_amount: Money::ZERO,
            total_paid: Money::ZERO,
            remaining_amount: Money::ZERO,
            percentage_paid: 0,
            status: MonthStatus::NotApplicable,
            is_leave: false,
            leave_reason: None,
            has_payment: false,
            primary_payment: None,
        }
    }

    fn on_leave(period: Period, reason: Option<String>) -> Self {
        Self {
            period,
            required_amount: Money::ZERO,
            total_paid: Money::ZERO,
            remaining_amount: Money::ZERO,
            percentage_paid: 0,
            status: MonthStatus::Leave,
            is_leave: true,
            leave_reason: reason,
            has_payment: false,
            primary_payment: None,
        }
    }
}

/// reconcile one (entity, month) slot against its payments and leaves.
///
/// membership and leave short-circuit before any amount arithmetic; a month
/// outside the billing window or under leave never reaches the overdue check.
pub fn resolve_month(
    entity: &BillableEntity,
    payments: &[PaymentRecord],
    leaves: &LeaveRegister,
    period: Period,
    today: NaiveDate,
) -> MonthlyStatus {
    if !entity.is_billable_in(period) {
        return MonthlyStatus::not_applicable(period);
    }

    if let Some(leave) = leaves.get(entity.id, period) {
        return MonthlyStatus::on_leave(period, leave.reason.clone());
    }

    let applicable = applicable_payments(payments, entity.id, period);
    let required_amount = resolve_required_amount(&applicable, entity.periodic_fee);
    let paid = total_paid(&applicable);

    let remaining_amount = (required_amount - paid).max(Money::ZERO);
    let percentage_paid = paid.percent_of(required_amount);
    let is_fully_paid = !required_amount.is_zero() && paid >= required_amount;

    let due_date = period.due_date(entity.due_day);
    let is_overdue = today > due_date && !is_fully_paid;

    // months of the current or a past year count as elapsed; only future
    // years sit at NotDue with no billing activity
    let within_elapsed_period = period.year <= today.year();
    let has_payment = !applicable.is_empty();

    let status = classify(is_fully_paid, is_overdue, paid, has_payment, within_elapsed_period);

    MonthlyStatus {
        period,
        required_amount,
        total_paid: paid,
        remaining_amount,
        percentage_paid,
        status,
        is_leave: false,
        leave_reason: None,
        has_payment,
        primary_payment: primary_payment(&applicable),
    }
}

/// reconcile all 12 months of a year, january first
pub fn resolve_year(
    entity: &BillableEntity,
    payments: &[PaymentRecord],
    leaves: &LeaveRegister,
    year: i32,
    today: NaiveDate,
) -> YearStatement {
    let months = Period::year_iter(year)
        .map(|period| resolve_month(entity, payments, leaves, period, today))
        .collect();
    YearStatement::new(entity.id, year, months)
}

/// the amount owed for a month. a discounted billing wins over a plain
/// snapshot, which wins over the entity's current fee.
///
/// when several applicable payments carry different discounts the first in
/// input order wins; observed behavior of the original flows, kept as-is.
fn resolve_required_amount(applicable: &[&PaymentRecord], current_fee: Money) -> Money {
    if let Some(discounted) = applicable.iter().find(|p| p.has_discount()) {
        return discounted.billed_amount;
    }
    if let Some(snapshot) = applicable.iter().find(|p| !p.billed_amount.is_zero()) {
        return snapshot.billed_amount;
    }
    current_fee
}
