use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a billable entity
pub type EntityId = Uuid;

/// unique identifier for a payment record
pub type PaymentId = Uuid;

/// unique identifier for a leave record
pub type LeaveId = Uuid;

/// what kind of recurring obligation an entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingKind {
    /// student tuition fee
    Tuition,
    /// dormitory boarding fee
    Dormitory,
    /// staff salary obligation
    Salary,
}

/// persisted state of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    /// created but nothing paid yet
    Pending,
    /// some amount paid, less than billed
    PartiallyPaid,
    /// fully paid
    Completed,
}

impl PaymentState {
    /// a record that can still accept further payment
    pub fn is_open(&self) -> bool {
        matches!(self, PaymentState::Pending | PaymentState::PartiallyPaid)
    }
}

/// derived classification of one reconciled month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStatus {
    /// month falls outside the entity's membership window
    NotApplicable,
    /// future month with no billing activity yet
    NotDue,
    /// entity is exempt for this month
    Leave,
    /// billing applies, nothing paid, not yet past due
    Pending,
    /// some amount paid, less than required
    PartiallyPaid,
    /// past due date and not fully paid
    Overdue,
    /// fully paid
    Completed,
}

impl MonthStatus {
    /// months that still carry an outstanding balance
    pub fn is_outstanding(&self) -> bool {
        matches!(
            self,
            MonthStatus::Pending | MonthStatus::PartiallyPaid | MonthStatus::Overdue
        )
    }

    /// months excluded from billing entirely
    pub fn is_exempt(&self) -> bool {
        matches!(self, MonthStatus::NotApplicable | MonthStatus::Leave)
    }
}
