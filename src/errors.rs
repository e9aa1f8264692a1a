use thiserror::Error;

use crate::decimal::Money;
use crate::types::EntityId;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("invalid due day: {due_day} (must be 1-28)")]
    InvalidDueDay {
        due_day: u8,
    },

    #[error("invalid month: {month} (must be 1-12)")]
    InvalidMonth {
        month: u32,
    },

    #[error("invalid membership window: start {start}, end {end}")]
    InvalidMembershipWindow {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("duplicate leave for entity {entity_id} in {year}-{month:02}")]
    DuplicateLeave {
        entity_id: EntityId,
        year: i32,
        month: u32,
    },

    #[error("leave not found for entity {entity_id} in {year}-{month:02}")]
    LeaveNotFound {
        entity_id: EntityId,
        year: i32,
        month: u32,
    },

    #[error("payment record requires an explicit billing period")]
    MissingPeriod,

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("malformed statement: expected 12 months, got {months}")]
    MalformedStatement {
        months: usize,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
