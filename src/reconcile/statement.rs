use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::reconcile::resolver::MonthlyStatus;
use crate::types::{EntityId, MonthStatus};

/// one reconciled year for one entity: exactly 12 monthly slots plus the
/// summary figures dashboards render around them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStatement {
    entity_id: EntityId,
    year: i32,
    months: Vec<MonthlyStatus>,
}

impl YearStatement {
    pub(crate) fn new(entity_id: EntityId, year: i32, months: Vec<MonthlyStatus>) -> Self {
        debug_assert_eq!(months.len(), 12);
        Self {
            entity_id,
            year,
            months,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// all 12 months, january first
    pub fn months(&self) -> &[MonthlyStatus] {
        &self.months
    }

    /// one month, 1-12
    pub fn month(&self, month: u32) -> Option<&MonthlyStatus> {
        if (1..=12).contains(&month) {
            self.months.get((month - 1) as usize)
        } else {
            None
        }
    }

    /// sum of required amounts across billable months
    pub fn total_required(&self) -> Money {
        self.months.iter().map(|m| m.required_amount).sum()
    }

    /// sum of paid amounts across the year
    pub fn total_paid(&self) -> Money {
        self.months.iter().map(|m| m.total_paid).sum()
    }

    /// sum of clamped remaining amounts across the year
    pub fn total_remaining(&self) -> Money {
        self.months.iter().map(|m| m.remaining_amount).sum()
    }

    /// paid ratio over the whole year as a rounded whole percentage
    pub fn overall_percentage(&self) -> u32 {
        self.total_paid().percent_of(self.total_required())
    }

    /// number of months currently overdue
    pub fn months_overdue(&self) -> usize {
        self.months
            .iter()
            .filter(|m| m.status == MonthStatus::Overdue)
            .count()
    }

    /// months that still carry a balance, in calendar order
    pub fn outstanding_months(&self) -> impl Iterator<Item = &MonthlyStatus> {
        self.months.iter().filter(|m| m.status.is_outstanding())
    }

    /// serialize for dashboard consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// restore a statement previously produced by [`YearStatement::to_json`].
    /// rejects payloads that do not carry exactly 12 months
    pub fn from_json(json: &str) -> Result<Self> {
        let statement: Self = serde_json::from_str(json)?;
        if statement.months.len() != 12 {
            return Err(BillingError::MalformedStatement {
                months: statement.months.len(),
            });
        }
        Ok(statement)
    }
}
