use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::Period;
use crate::decimal::{Money, Rate};
use crate::errors::{BillingError, Result};
use crate::types::{EntityId, PaymentId, PaymentState};

/// one payment transaction against a billable entity for a specific month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub entity_id: EntityId,
    /// amount due at time of billing; a snapshot decoupled from the entity's
    /// current fee so historical months stay computed against the fee in
    /// effect then
    pub billed_amount: Money,
    /// cumulative amount paid toward this month; None on legacy rows that
    /// only recorded a state
    pub paid_amount: Option<Money>,
    pub state: PaymentState,
    /// the month this payment applies to; None only on legacy rows, which
    /// are attributed by `paid_on` falling inside the target month
    pub period: Option<Period>,
    /// date the payment transaction was recorded
    pub paid_on: NaiveDate,
    pub discount_amount: Option<Money>,
    pub discount_percentage: Option<Rate>,
    pub original_amount: Option<Money>,
}

impl PaymentRecord {
    pub fn builder() -> PaymentRecordBuilder {
        PaymentRecordBuilder::new()
    }

    /// whether this record counts toward a target month: explicit tag match,
    /// or date inference for untagged legacy rows
    pub fn applies_to(&self, period: Period) -> bool {
        match self.period {
            Some(tagged) => tagged == period,
            None => period.contains(self.paid_on),
        }
    }

    /// amount actually paid. a Completed record with no paid amount counts
    /// as paid in full; legacy and externally-sourced rows recorded
    /// completion without populating the incremental field
    pub fn effective_paid(&self) -> Money {
        match self.paid_amount {
            Some(paid) => paid,
            None if self.state == PaymentState::Completed => self.billed_amount,
            None => Money::ZERO,
        }
    }

    /// whether a discount was applied when this month was billed
    pub fn has_discount(&self) -> bool {
        self.discount_amount.is_some_and(|d| !d.is_zero())
    }
}

/// builder for payment records. the billing period is mandatory here;
/// untagged rows can only enter through [`PaymentRecord::legacy_untagged`]
#[derive(Debug, Default)]
pub struct PaymentRecordBuilder {
    entity_id: Option<EntityId>,
    billed_amount: Option<Money>,
    paid_amount: Option<Money>,
    state: Option<PaymentState>,
    period: Option<Period>,
    paid_on: Option<NaiveDate>,
    discount_amount: Option<Money>,
    original_amount: Option<Money>,
}

impl PaymentRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_id(mut self, id: EntityId) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn billed_amount(mut self, amount: Money) -> Self {
        self.billed_amount = Some(amount);
        self
    }

    pub fn paid_amount(mut self, amount: Money) -> Self {
        self.paid_amount = Some(amount);
        self
    }

    pub fn state(mut self, state: PaymentState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.paid_on = Some(date);
        self
    }

    /// record a discount: the billed amount becomes `original - discount`
    pub fn discount(mut self, original: Money, discount: Money) -> Self {
        self.original_amount = Some(original);
        self.discount_amount = Some(discount);
        self.billed_amount = Some((original - discount).max(Money::ZERO));
        self
    }

    pub fn build(self) -> Result<PaymentRecord> {
        let entity_id = self.entity_id.ok_or(BillingError::InvalidConfiguration {
            message: "entity_id is required".to_string(),
        })?;
        let period = self.period.ok_or(BillingError::MissingPeriod)?;
        let billed_amount = self.billed_amount.unwrap_or(Money::ZERO);
        if billed_amount.is_negative() {
            return Err(BillingError::InvalidPaymentAmount {
                amount: billed_amount,
            });
        }
        if let Some(paid) = self.paid_amount {
            if paid.is_negative() {
                return Err(BillingError::InvalidPaymentAmount { amount: paid });
            }
        }

        let discount_percentage = match (self.discount_amount, self.original_amount) {
            (Some(discount), Some(original)) if !original.is_zero() => Some(Rate::from_decimal(
                discount.as_decimal() / original.as_decimal(),
            )),
            _ => None,
        };

        Ok(PaymentRecord {
            id: Uuid::new_v4(),
            entity_id,
            billed_amount,
            paid_amount: self.paid_amount,
            state: self.state.unwrap_or(PaymentState::Pending),
            period: Some(period),
            paid_on: self.paid_on.unwrap_or(period.first_day()),
            discount_amount: self.discount_amount,
            discount_percentage,
            original_amount: self.original_amount,
        })
    }
}

impl PaymentRecord {
    /// legacy row with no explicit period tag; attributed by payment date.
    /// new writes should use the builder and run legacy data through
    /// [`crate::backfill::backfill_periods`] once
    pub fn legacy_untagged(
        entity_id: EntityId,
        billed_amount: Money,
        paid_amount: Option<Money>,
        state: PaymentState,
        paid_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id,
            billed_amount,
            paid_amount,
            state,
            period: None,
            paid_on,
            discount_amount: None,
            discount_percentage: None,
            original_amount: None,
        }
    }
}

/// filter payments down to those counting toward one (entity, month) slot
pub fn applicable_payments<'a>(
    payments: &'a [PaymentRecord],
    entity_id: EntityId,
    period: Period,
) -> Vec<&'a PaymentRecord> {
    payments
        .iter()
        .filter(|p| p.entity_id == entity_id && p.applies_to(period))
        .collect()
}

/// total paid toward a month across its applicable payments
pub fn total_paid(applicable: &[&PaymentRecord]) -> Money {
    applicable.iter().map(|p| p.effective_paid()).sum()
}

/// the first open payment to resume paying against, if any. callers route
/// "continue paying" to this record and "create new payment" otherwise
pub fn primary_payment(applicable: &[&PaymentRecord]) -> Option<PaymentId> {
    applicable.iter().find(|p| p.state.is_open()).map(|p| p.id)
}
