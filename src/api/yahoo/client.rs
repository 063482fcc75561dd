use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Url;
use tracing::{debug, warn};
use super::models::{ChartApiError, ChartResponse};
use crate::models::DailyPrice;
use crate::services::price_service::{PriceRequest, PriceSource};
use crate::utils::FetchError;

/// Yahoo Finance chart API client for daily price history
pub struct YahooClient {
    http_client: HttpClient,
    base_url: String,
}

impl YahooClient {
    const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/v8/finance/chart";
    const AGENT: &'static str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// `{base_url}/{ticker}?period1=..&period2=..&interval=1d`
    fn chart_url(&self, request: &PriceRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Request(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| FetchError::Request(format!("Base URL {} cannot take a path", self.base_url)))?
            .push(&request.ticker);

        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(request.start).to_string())
            .append_pair("period2", &unix_midnight(request.end).to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");

        Ok(url)
    }

    /// Map a non-success response to a fetch error
    async fn handle_error_response(ticker: &str, response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status {
            404 => FetchError::UnknownInstrument(ticker.to_string()),
            _ => {
                // Yahoo wraps most failures in chart.error
                let description = serde_json::from_str::<ChartResponse>(&body_text)
                    .ok()
                    .and_then(|r| r.chart.error)
                    .and_then(|e| e.description.or(Some(e.code)))
                    .unwrap_or(body_text);
                warn!("Yahoo returned {} for {}: {}", status, ticker, description);
                FetchError::Http(status, description)
            }
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a `chart.error` object to a fetch error, keeping Yahoo's message
fn chart_error(ticker: &str, err: ChartApiError) -> FetchError {
    if err.code.eq_ignore_ascii_case("Not Found") {
        return FetchError::UnknownInstrument(ticker.to_string());
    }

    match err.description {
        Some(description) => FetchError::Provider(format!("{}: {}", err.code, description)),
        None => FetchError::Provider(err.code),
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).timestamp()
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch(&self, request: &PriceRequest) -> Result<Vec<DailyPrice>, FetchError> {
        if request.is_empty_window() {
            debug!("Empty window {}..{} for {}, skipping request", request.start, request.end, request.ticker);
            return Ok(Vec::new());
        }

        let url = self.chart_url(request)?;
        debug!("GET {}", url);

        let response = self.http_client
            .get(url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| FetchError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(&request.ticker, response).await);
        }

        let body = response
            .json::<ChartResponse>()
            .await
            .map_err(|e| FetchError::Deserialization(format!("Failed to parse response: {}", e)))?;

        if let Some(err) = body.chart.error {
            debug!("Yahoo chart error for {}: {:?}", request.ticker, err);
            return Err(chart_error(&request.ticker, err));
        }

        let result = body
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| FetchError::UnknownInstrument(request.ticker.clone()))?;

        let prices = result.into_daily_prices();
        debug!("Fetched {} daily prices for {}", prices.len(), request.ticker);
        Ok(prices)
    }
}
