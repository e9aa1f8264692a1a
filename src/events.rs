use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::types::{EntityId, LeaveId, PaymentId};

/// events emitted by the mutating surfaces (leave register, backfill).
/// reconciliation itself is a pure projection and emits nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LeaveRecorded {
        leave_id: LeaveId,
        entity_id: EntityId,
        period: Period,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },
    LeaveRevoked {
        leave_id: LeaveId,
        entity_id: EntityId,
        period: Period,
        timestamp: DateTime<Utc>,
    },
    PaymentBackfilled {
        payment_id: PaymentId,
        entity_id: EntityId,
        inferred_period: Period,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
