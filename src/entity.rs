use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::Period;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::types::{BillingKind, EntityId};

/// a thing subject to a recurring monthly fee: a student's tuition,
/// a dormitory assignment, or an employee's salary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillableEntity {
    pub id: EntityId,
    pub kind: BillingKind,
    /// display label, e.g. student or employee name
    pub label: String,
    /// monthly amount currently in effect; historical months are computed
    /// against the snapshot captured on their payment records
    pub periodic_fee: Money,
    /// day of month payment is due, 1-28
    pub due_day: u8,
    /// start of the billing window (check-in, enrollment, hire date)
    pub membership_start: Option<NaiveDate>,
    /// end of the billing window; None means still active
    pub membership_end: Option<NaiveDate>,
}

impl BillableEntity {
    pub fn builder() -> BillableEntityBuilder {
        BillableEntityBuilder::new()
    }

    /// tuition obligation with an enrollment window
    pub fn tuition(label: impl Into<String>, fee: Money, due_day: u8) -> Result<Self> {
        Self::builder()
            .kind(BillingKind::Tuition)
            .label(label)
            .periodic_fee(fee)
            .due_day(due_day)
            .build()
    }

    /// dormitory obligation bounded by check-in/check-out
    pub fn dormitory(
        label: impl Into<String>,
        fee: Money,
        due_day: u8,
        check_in: NaiveDate,
        check_out: Option<NaiveDate>,
    ) -> Result<Self> {
        let mut builder = Self::builder()
            .kind(BillingKind::Dormitory)
            .label(label)
            .periodic_fee(fee)
            .due_day(due_day)
            .membership_start(check_in);
        if let Some(out) = check_out {
            builder = builder.membership_end(out);
        }
        builder.build()
    }

    /// salary obligation bounded by the employment window
    pub fn salary(
        label: impl Into<String>,
        amount: Money,
        due_day: u8,
        hired_on: NaiveDate,
    ) -> Result<Self> {
        Self::builder()
            .kind(BillingKind::Salary)
            .label(label)
            .periodic_fee(amount)
            .due_day(due_day)
            .membership_start(hired_on)
            .build()
    }

    /// whether a month falls inside the entity's billing window.
    /// comparison is month-granular: the months containing the start and
    /// end dates are themselves billable.
    pub fn is_billable_in(&self, period: Period) -> bool {
        if let Some(start) = self.membership_start {
            if period < Period::from_date(start) {
                return false;
            }
        }
        if let Some(end) = self.membership_end {
            if period > Period::from_date(end) {
                return false;
            }
        }
        true
    }
}

/// builder for billable entities
#[derive(Debug, Default)]
pub struct BillableEntityBuilder {
    kind: Option<BillingKind>,
    label: Option<String>,
    periodic_fee: Option<Money>,
    due_day: Option<u8>,
    membership_start: Option<NaiveDate>,
    membership_end: Option<NaiveDate>,
}

impl BillableEntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: BillingKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn periodic_fee(mut self, fee: Money) -> Self {
        self.periodic_fee = Some(fee);
        self
    }

    pub fn due_day(mut self, day: u8) -> Self {
        self.due_day = Some(day);
        self
    }

    pub fn membership_start(mut self, date: NaiveDate) -> Self {
        self.membership_start = Some(date);
        self
    }

    pub fn membership_end(mut self, date: NaiveDate) -> Self {
        self.membership_end = Some(date);
        self
    }

    pub fn build(self) -> Result<BillableEntity> {
        let kind = self.kind.ok_or(BillingError::InvalidConfiguration {
            message: "billing kind is required".to_string(),
        })?;
        let due_day = self.due_day.unwrap_or(1);
        if !(1..=28).contains(&due_day) {
            return Err(BillingError::InvalidDueDay { due_day });
        }
        if let (Some(start), Some(end)) = (self.membership_start, self.membership_end) {
            if end < start {
                return Err(BillingError::InvalidMembershipWindow { start, end });
            }
        }
        let fee = self.periodic_fee.unwrap_or(Money::ZERO);
        if fee.is_negative() {
            return Err(BillingError::InvalidPaymentAmount { amount: fee });
        }

        Ok(BillableEntity {
            id: Uuid::new_v4(),
            kind,
            label: self.label.unwrap_or_default(),
            periodic_fee: fee,
            due_day,
            membership_start: self.membership_start,
            membership_end: self.membership_end,
        })
    }
}
