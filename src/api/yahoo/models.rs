use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::models::DailyPrice;

/// Top level body of the v8 chart endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartApiError>,
}

/// Provider level error, e.g. `{"code":"Not Found","description":"No data found, symbol may be delisted"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartApiError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Missing when the window holds no trading days
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: i64,
    pub exchange_timezone_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-wise OHLCV arrays aligned with `ChartResult::timestamp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResult {
    /// Convert the columnar payload into daily records.
    ///
    /// Each bar is dated in exchange-local time. Bars without an open are
    /// skipped. Output is ascending by date.
    pub fn into_daily_prices(self) -> Vec<DailyPrice> {
        let offset = self.meta.gmtoffset;
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

        let mut prices: Vec<DailyPrice> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let open = at(&quote.open, i)?;
                let date = Utc.timestamp_opt(ts + offset, 0).single()?.date_naive();
                Some(DailyPrice {
                    date,
                    open,
                    high: at(&quote.high, i),
                    low: at(&quote.low, i),
                    close: at(&quote.close, i),
                    volume: quote.volume.get(i).copied().flatten(),
                })
            })
            .collect();

        prices.sort_by_key(|p| p.date);
        prices
    }
}
