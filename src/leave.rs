use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::calendar::Period;
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::types::{EntityId, LeaveId};

/// an exemption from billing for one entity in one specific month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: LeaveId,
    pub entity_id: EntityId,
    pub period: Period,
    pub reason: Option<String>,
}

/// in-memory register of leave records, enforcing at most one leave per
/// (entity, month). mirrors the uniqueness constraint the storage layer
/// carries in a deployed system
#[derive(Debug, Default, Clone)]
pub struct LeaveRegister {
    entries: HashMap<(EntityId, Period), LeaveRecord>,
}

impl LeaveRegister {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// seed a register from already-fetched rows. later duplicates for the
    /// same (entity, month) are dropped
    pub fn from_records(records: impl IntoIterator<Item = LeaveRecord>) -> Self {
        let mut register = Self::new();
        for record in records {
            register
                .entries
                .entry((record.entity_id, record.period))
                .or_insert(record);
        }
        register
    }

    /// record a leave. fails if the (entity, month) slot is already taken
    pub fn record(
        &mut self,
        entity_id: EntityId,
        period: Period,
        reason: Option<String>,
        events: &mut EventStore,
    ) -> Result<LeaveId> {
        if self.entries.contains_key(&(entity_id, period)) {
            return Err(BillingError::DuplicateLeave {
                entity_id,
                year: period.year,
                month: period.month,
            });
        }

        let record = LeaveRecord {
            id: Uuid::new_v4(),
            entity_id,
            period,
            reason: reason.clone(),
        };
        let leave_id = record.id;
        self.entries.insert((entity_id, period), record);

        events.emit(Event::LeaveRecorded {
            leave_id,
            entity_id,
            period,
            reason,
            timestamp: Utc::now(),
        });

        Ok(leave_id)
    }

    /// revoke the leave for an (entity, month) slot
    pub fn revoke(
        &mut self,
        entity_id: EntityId,
        period: Period,
        events: &mut EventStore,
    ) -> Result<()> {
        let record = self.entries.remove(&(entity_id, period)).ok_or(
            BillingError::LeaveNotFound {
                entity_id,
                year: period.year,
                month: period.month,
            },
        )?;

        events.emit(Event::LeaveRevoked {
            leave_id: record.id,
            entity_id,
            period,
            timestamp: Utc::now(),
        });

        Ok(())
    }

    /// the leave for an (entity, month) slot, if any
    pub fn get(&self, entity_id: EntityId, period: Period) -> Option<&LeaveRecord> {
        self.entries.get(&(entity_id, period))
    }

    /// all leaves for an entity within one calendar year
    pub fn for_entity_year(&self, entity_id: EntityId, year: i32) -> Vec<&LeaveRecord> {
        let mut leaves: Vec<&LeaveRecord> = self
            .entries
            .values()
            .filter(|l| l.entity_id == entity_id && l.period.year == year)
            .collect();
        leaves.sort_by_key(|l| l.period);
        leaves
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(y: i32, m: u32) -> Period {
        Period::new(y, m).unwrap()
    }

    #[test]
    fn test_record_and_get() {
        let mut register = LeaveRegister::new();
        let mut events = EventStore::new();
        let entity_id = Uuid::new_v4();

        let leave_id = register
            .record(entity_id, period(2024, 7), Some("home visit".to_string()), &mut events)
            .unwrap();

        let found = register.get(entity_id, period(2024, 7)).unwrap();
        assert_eq!(found.id, leave_id);
        assert_eq!(found.reason.as_deref(), Some("home visit"));
        assert!(matches!(events.events()[0], Event::LeaveRecorded { .. }));
    }

    #[test]
    fn test_duplicate_leave_rejected() {
        let mut register = LeaveRegister::new();
        let mut events = EventStore::new();
        let entity_id = Uuid::new_v4();

        register
            .record(entity_id, period(2024, 7), None, &mut events)
            .unwrap();
        let result = register.record(entity_id, period(2024, 7), None, &mut events);
        assert!(matches!(
            result,
            Err(BillingError::DuplicateLeave { month: 7, .. })
        ));

        // same month for a different entity is fine
        let other = Uuid::new_v4();
        assert!(register.record(other, period(2024, 7), None, &mut events).is_ok());
    }

    #[test]
    fn test_revoke() {
        let mut register = LeaveRegister::new();
        let mut events = EventStore::new();
        let entity_id = Uuid::new_v4();

        register
            .record(entity_id, period(2024, 7), None, &mut events)
            .unwrap();
        register.revoke(entity_id, period(2024, 7), &mut events).unwrap();

        assert!(register.get(entity_id, period(2024, 7)).is_none());
        assert!(matches!(
            register.revoke(entity_id, period(2024, 7), &mut events),
            Err(BillingError::LeaveNotFound { .. })
        ));
    }

    #[test]
    fn test_from_records_drops_duplicates() {
        let entity_id = Uuid::new_v4();
        let first = LeaveRecord {
            id: Uuid::new_v4(),
            entity_id,
            period: period(2024, 7),
            reason: Some("kept".to_string()),
        };
        let duplicate = LeaveRecord {
            id: Uuid::new_v4(),
            entity_id,
            period: period(2024, 7),
            reason: Some("dropped".to_string()),
        };

        let register = LeaveRegister::from_records(vec![first.clone(), duplicate]);
        assert_eq!(register.len(), 1);
        assert_eq!(register.get(entity_id, period(2024, 7)), Some(&first));
    }

    #[test]
    fn test_for_entity_year_sorted() {
        let mut register = LeaveRegister::new();
        let mut events = EventStore::new();
        let entity_id = Uuid::new_v4();

        register.record(entity_id, period(2024, 9), None, &mut events).unwrap();
        register.record(entity_id, period(2024, 2), None, &mut events).unwrap();
        register.record(entity_id, period(2023, 5), None, &mut events).unwrap();

        let year = register.for_entity_year(entity_id, 2024);
        let months: Vec<u32> = year.iter().map(|l| l.period.month).collect();
        assert_eq!(months, vec![2, 9]);
    }
}
