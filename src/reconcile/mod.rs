pub mod classify;
pub mod resolver;
pub mod statement;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::calendar::Period;
use crate::entity::BillableEntity;
use crate::leave::LeaveRegister;
use crate::payment::PaymentRecord;

pub use classify::classify;
pub use resolver::{resolve_month, resolve_year, MonthlyStatus};
pub use statement::YearStatement;

/// façade binding reconciliation to an injected clock. the pure functions in
/// [`resolver`] take an explicit `today`; this reads it from a time provider
/// the way callers hold one for the rest of their request handling
pub struct Reconciler<'t> {
    time: &'t SafeTimeProvider,
}

impl<'t> Reconciler<'t> {
    pub fn new(time: &'t SafeTimeProvider) -> Self {
        Self { time }
    }

    /// the date reconciliation runs against
    pub fn today(&self) -> NaiveDate {
        self.time.now().date_naive()
    }

    /// reconcile all 12 months of a year as of the provider's current date
    pub fn resolve_year(
        &self,
        entity: &BillableEntity,
        payments: &[PaymentRecord],
        leaves: &LeaveRegister,
        year: i32,
    ) -> YearStatement {
        resolver::resolve_year(entity, payments, leaves, year, self.today())
    }

    /// reconcile a single month as of the provider's current date
    pub fn resolve_month(
        &self,
        entity: &BillableEntity,
        payments: &[PaymentRecord],
        leaves: &LeaveRegister,
        period: Period,
    ) -> MonthlyStatus {
        resolver::resolve_month(entity, payments, leaves, period, self.today())
    }
}
