use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BillingError, Result};

/// english month names, index 0 = january
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// one calendar month of one year, the granularity all billing operates at
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// create a period, validating the month is 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BillingError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// the period containing a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// first day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MAX)
    }

    /// whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// the due date for this month given a day-of-month (1-28)
    pub fn due_date(&self, due_day: u8) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, u32::from(due_day))
            .unwrap_or_else(|| self.last_day())
    }

    /// the following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// the preceding month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// english month name, e.g. "June"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// all 12 periods of a year, january first
    pub fn year_iter(year: i32) -> impl Iterator<Item = Period> {
        (1..=12).map(move |month| Period { year, month })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_validation() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        assert!(Period::new(2024, 12).is_ok());
    }

    #[test]
    fn test_ordering_spans_years() {
        let dec = Period::new(2023, 12).unwrap();
        let jan = Period::new(2024, 1).unwrap();
        assert!(dec < jan);
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.prev(), dec);
    }

    #[test]
    fn test_containment() {
        let june = Period::new(2024, 6).unwrap();
        assert!(june.contains(date(2024, 6, 1)));
        assert!(june.contains(date(2024, 6, 30)));
        assert!(!june.contains(date(2024, 7, 1)));
        assert!(!june.contains(date(2023, 6, 15)));
    }

    #[test]
    fn test_due_date() {
        let june = Period::new(2024, 6).unwrap();
        assert_eq!(june.due_date(5), date(2024, 6, 5));
        // february handles the full 1-28 range
        let feb = Period::new(2023, 2).unwrap();
        assert_eq!(feb.due_date(28), date(2023, 2, 28));
    }

    #[test]
    fn test_last_day() {
        assert_eq!(Period::new(2024, 2).unwrap().last_day(), date(2024, 2, 29));
        assert_eq!(Period::new(2023, 2).unwrap().last_day(), date(2023, 2, 28));
        assert_eq!(Period::new(2024, 12).unwrap().last_day(), date(2024, 12, 31));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Period::new(2024, 1).unwrap().month_name(), "January");
        assert_eq!(Period::new(2024, 12).unwrap().month_name(), "December");
        assert_eq!(Period::new(2024, 6).unwrap().to_string(), "June 2024");
    }

    #[test]
    fn test_year_iter() {
        let months: Vec<Period> = Period::year_iter(2024).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[11].month, 12);
    }
}
