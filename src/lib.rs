pub mod access;
pub mod backfill;
pub mod calendar;
pub mod decimal;
pub mod entity;
pub mod errors;
pub mod events;
pub mod leave;
pub mod limit;
pub mod payment;
pub mod reconcile;
pub mod types;

// re-export key types
pub use calendar::Period;
pub use decimal::{Money, Rate};
pub use entity::{BillableEntity, BillableEntityBuilder};
pub use errors::{BillingError, Result};
pub use events::{Event, EventStore};
pub use leave::{LeaveRecord, LeaveRegister};
pub use payment::{
    applicable_payments, primary_payment, total_paid, PaymentRecord, PaymentRecordBuilder,
};
pub use reconcile::{
    classify, resolve_month, resolve_year, MonthlyStatus, Reconciler, YearStatement,
};
pub use access::{Actor, Capability, RolePolicy};
pub use backfill::{backfill_periods, BackfillReport};
pub use limit::FixedWindowLimiter;
pub use types::{BillingKind, EntityId, LeaveId, MonthStatus, PaymentId, PaymentState};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
