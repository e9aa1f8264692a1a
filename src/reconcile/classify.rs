use crate::decimal::Money;
use crate::types::MonthStatus;

/// map a month's reconciled figures to its final status. first match wins:
/// fully paid, overdue, partial, pending, not due.
///
/// overdue is deliberately checked before pending: an unpaid past-due month
/// is never merely pending, and the distinction is what dashboards use to
/// flag at-risk accounts.
pub fn classify(
    is_fully_paid: bool,
    is_overdue: bool,
    total_paid: Money,
    has_payment: bool,
    within_elapsed_period: bool,
) -> MonthStatus {
    if is_fully_paid {
        MonthStatus::Completed
    } else if is_overdue {
        MonthStatus::Overdue
    } else if total_paid.is_positive() {
        MonthStatus::PartiallyPaid
    } else if has_payment || within_elapsed_period {
        MonthStatus::Pending
    } else {
        MonthStatus::NotDue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_paid_wins_over_everything() {
        // even a month flagged overdue classifies Completed once fully paid
        let status = classify(true, true, Money::from_major(500_000), true, true);
        assert_eq!(status, MonthStatus::Completed);
    }

    #[test]
    fn test_overdue_beats_partial_and_pending() {
        let status = classify(false, true, Money::from_major(200_000), true, true);
        assert_eq!(status, MonthStatus::Overdue);

        // unpaid past-due month is overdue, not pending
        let status = classify(false, true, Money::ZERO, false, true);
        assert_eq!(status, MonthStatus::Overdue);
    }

    #[test]
    fn test_partial_before_pending() {
        let status = classify(false, false, Money::from_major(100_000), true, true);
        assert_eq!(status, MonthStatus::PartiallyPaid);
    }

    #[test]
    fn test_pending_on_record_or_elapsed_period() {
        // existing payment record, nothing paid yet
        assert_eq!(
            classify(false, false, Money::ZERO, true, false),
            MonthStatus::Pending
        );
        // no record, but the month is current-or-past
        assert_eq!(
            classify(false, false, Money::ZERO, false, true),
            MonthStatus::Pending
        );
    }

    #[test]
    fn test_future_month_is_not_due() {
        assert_eq!(
            classify(false, false, Money::ZERO, false, false),
            MonthStatus::NotDue
        );
    }
}
