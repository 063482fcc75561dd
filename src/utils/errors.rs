use thiserror::Error;

/// Errors raised while retrieving daily prices
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown instrument '{0}'")]
    UnknownInstrument(String),
    #[error("Provider Error: {0}")]
    Provider(String),
    #[error("HTTP Error ({0}): {1}")]
    Http(u16, String),
    #[error("Request Error: {0}")]
    Request(String),
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

/// Errors raised while drawing the chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// Errors raised while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Any failure that aborts the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}
