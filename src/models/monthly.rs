//! Monthly summary models

use chrono::{Datelike, NaiveDate};

/// Calendar month used as the grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month always comes from a valid date, so day 1 exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// First and last opening price observed in one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Normalized to the first day of the month
    pub month: NaiveDate,
    pub start_open: f64,
    pub end_open: f64,
}
