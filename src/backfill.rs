use chrono::Utc;

use crate::calendar::Period;
use crate::events::{Event, EventStore};
use crate::payment::PaymentRecord;
use crate::types::PaymentId;

/// outcome of a period backfill run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackfillReport {
    /// records that received a period tag, with the period assigned
    pub tagged: Vec<(PaymentId, Period)>,
    /// records that already carried a tag and were left alone
    pub skipped: usize,
}

impl BackfillReport {
    pub fn tagged_count(&self) -> usize {
        self.tagged.len()
    }
}

/// stamp explicit period tags onto legacy untagged payment records, inferred
/// from their payment date. intended as a one-time migration: date inference
/// can misattribute a payment made late in one month but meant for another,
/// so steady-state data is expected to be fully tagged at write time.
///
/// idempotent: tagged records are never touched, so a second run is a no-op.
pub fn backfill_periods(
    payments: &mut [PaymentRecord],
    events: &mut EventStore,
) -> BackfillReport {
    let mut report = BackfillReport::default();

    for payment in payments.iter_mut() {
        if payment.period.is_some() {
            report.skipped += 1;
            continue;
        }

        let inferred = Period::from_date(payment.paid_on);
        payment.period = Some(inferred);
        report.tagged.push((payment.id, inferred));

        events.emit(Event::PaymentBackfilled {
            payment_id: payment.id,
            entity_id: payment.entity_id,
            inferred_period: inferred,
            timestamp: Utc::now(),
        });
    }

    report
}
