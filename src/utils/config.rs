use crate::utils::ConfigError;
use tracing::debug;

const TICKER: &str = "MONTHLY_OPEN_TICKER";
const START: &str = "MONTHLY_OPEN_START";
const END: &str = "MONTHLY_OPEN_END";
const SUBJECT: &str = "MONTHLY_OPEN_SUBJECT";
const OUTPUT: &str = "MONTHLY_OPEN_OUTPUT";
const WIDTH: &str = "MONTHLY_OPEN_WIDTH";
const HEIGHT: &str = "MONTHLY_OPEN_HEIGHT";

/// Run parameters, read from the environment (and `.env` if present)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ticker: String,
    pub start: String,
    pub end: String,
    pub subject: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticker: "BTC-USD".to_string(),
            start: "2016-01-01".to_string(),
            end: "2023-12-20".to_string(),
            subject: "Bitcoin".to_string(),
            output: "monthly_open.png".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup(TICKER) {
            config.ticker = v;
        }
        if let Some(v) = lookup(START) {
            config.start = v;
        }
        if let Some(v) = lookup(END) {
            config.end = v;
        }
        if let Some(v) = lookup(SUBJECT) {
            config.subject = v;
        }
        if let Some(v) = lookup(OUTPUT) {
            config.output = v;
        }
        if let Some(v) = lookup(WIDTH) {
            config.width = parse_dimension(WIDTH, v)?;
        }
        if let Some(v) = lookup(HEIGHT) {
            config.height = parse_dimension(HEIGHT, v)?;
        }

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

fn parse_dimension(key: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ticker, "BTC-USD");
        assert_eq!((config.width, config.height), (1200, 600));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (TICKER, "ETH-USD"),
            (SUBJECT, "Ethereum"),
            (WIDTH, "800"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.ticker, "ETH-USD");
        assert_eq!(config.subject, "Ethereum");
        assert_eq!(config.width, 800);
        assert_eq!(config.start, "2016-01-01");
    }

    #[test]
    fn test_invalid_dimension() {
        let result = Config::from_lookup(|k| (k == HEIGHT).then(|| "tall".to_string()));
        assert!(matches!(result, Err(ConfigError::Invalid { key: HEIGHT, .. })));

        let result = Config::from_lookup(|k| (k == WIDTH).then(|| "0".to_string()));
        assert!(result.is_err());
    }
}
