use async_trait::async_trait;
use chrono::NaiveDate;
use crate::models::DailyPrice;
use crate::utils::FetchError;

/// Instrument and date window to fetch; `start` inclusive, `end` exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PriceRequest {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, FetchError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(FetchError::InvalidRequest("Ticker cannot be empty".to_string()));
        }

        if start > end {
            return Err(FetchError::InvalidRequest(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        Ok(Self {
            ticker: ticker.to_string(),
            start,
            end,
        })
    }

    /// True when `start == end`; with an exclusive end there is nothing to fetch
    pub fn is_empty_window(&self) -> bool {
        self.start == self.end
    }

    /// Build a request from ISO-8601 (`YYYY-MM-DD`) date strings
    pub fn parse(ticker: &str, start: &str, end: &str) -> Result<Self, FetchError> {
        Self::new(ticker, parse_date(start)?, parse_date(end)?)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FetchError::InvalidDate(value.to_string()))
}

/// Anything that can supply daily prices for an instrument
#[async_trait]
pub trait PriceSource {
    /// Daily records in the window, ascending by date
    async fn fetch(&self, request: &PriceRequest) -> Result<Vec<DailyPrice>, FetchError>;
}
