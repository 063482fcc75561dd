//! Daily price models

use chrono::NaiveDate;

/// One trading day as returned by a price source
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub open: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl DailyPrice {
    /// Record carrying only an opening price
    #[cfg(test)]
    pub fn with_open(date: NaiveDate, open: f64) -> Self {
        Self {
            date,
            open,
            high: None,
            low: None,
            close: None,
            volume: None,
        }
    }
}
