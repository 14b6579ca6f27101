//! Prediction configuration: tickers, events, disclaimer, and defaults.
//!
//! Accepts the JSON document the dashboard has always used, and the same
//! shape as TOML for hand-edited setups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::{bind_events, EventBinding, PredictionEvent, Ticker};
use crate::returns::DEFAULT_PRINCIPAL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("config lists no tickers")]
    NoTickers,

    #[error("ticker at position {0} has an empty symbol")]
    EmptySymbol(usize),

    #[error("duplicate ticker symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("invest_amount_usd must be a positive amount, got {0}")]
    InvalidInvestAmount(f64),
}

/// Top-level prediction config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default)]
    pub disclaimer: String,
    pub tickers: Vec<Ticker>,
    #[serde(default)]
    pub events: Vec<PredictionEvent>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub data_window: DataWindow,
    #[serde(default)]
    pub data_source: DataSourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_invest_amount")]
    pub invest_amount_usd: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            invest_amount_usd: default_invest_amount(),
        }
    }
}

fn default_invest_amount() -> f64 {
    DEFAULT_PRINCIPAL
}

/// Oldest date kept when refreshing the price snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataWindow {
    #[serde(default = "default_earliest_date")]
    pub earliest_date: NaiveDate,
}

impl Default for DataWindow {
    fn default() -> Self {
        Self {
            earliest_date: default_earliest_date(),
        }
    }
}

fn default_earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default()
}

/// Provenance recorded into the snapshot on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_field")]
    pub field: String,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            field: default_field(),
        }
    }
}

fn default_provider() -> String {
    "Alpha Vantage".into()
}

fn default_endpoint() -> String {
    "TIME_SERIES_DAILY_ADJUSTED".into()
}

fn default_field() -> String {
    "5. adjusted close".into()
}

impl PredictionConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse by file extension: `.toml` is TOML, anything else JSON.
    pub fn from_str_for(name: &str, s: &str) -> Result<Self, ConfigError> {
        if name.ends_with(".toml") {
            Self::from_toml(s)
        } else {
            Self::from_json(s)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::NoTickers);
        }
        let mut seen = HashSet::new();
        for (i, ticker) in self.tickers.iter().enumerate() {
            if ticker.symbol.trim().is_empty() {
                return Err(ConfigError::EmptySymbol(i));
            }
            if !seen.insert(ticker.symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(ticker.symbol.clone()));
            }
        }
        let amount = self.metrics.invest_amount_usd;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConfigError::InvalidInvestAmount(amount));
        }
        Ok(())
    }

    /// Events bound to their tags and colors, in config order.
    pub fn event_bindings(&self) -> Vec<EventBinding> {
        bind_events(&self.events)
    }

    pub fn principal(&self) -> f64 {
        self.metrics.invest_amount_usd
    }

    /// Position and entry of `symbol` in the ticker list.
    pub fn ticker(&self, symbol: &str) -> Option<(usize, &Ticker)> {
        self.tickers.iter().enumerate().find(|(_, t)| t.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "disclaimer": "Not investment advice.",
        "tickers": [
            {"symbol": "SPY", "name": "S&P 500 ETF"},
            {"symbol": "QQQ", "name": "Nasdaq 100 ETF"}
        ],
        "events": [
            {"date": "2025-08-08", "title": "First call", "label": "Aug 8", "url": "https://example.com/1"},
            {"date": "2025-09-02", "title": "Second call", "label": "Sep 2", "url": "https://example.com/2"}
        ]
    }"#;

    #[test]
    fn parses_json_with_defaults() {
        let config = PredictionConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.tickers.len(), 2);
        assert_eq!(config.events.len(), 2);
        assert_eq!(config.principal(), 1000.0);
        assert_eq!(
            config.data_window.earliest_date,
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
        assert_eq!(config.data_source.field, "5. adjusted close");
    }

    #[test]
    fn explicit_invest_amount_wins() {
        let json = SAMPLE.replacen(
            "\"disclaimer\"",
            "\"metrics\": {\"invest_amount_usd\": 2500}, \"disclaimer\"",
            1,
        );
        let config = PredictionConfig::from_json(&json).unwrap();
        assert_eq!(config.principal(), 2500.0);
    }

    #[test]
    fn parses_toml() {
        let toml_str = r#"
disclaimer = "Not investment advice."

[[tickers]]
symbol = "SPY"
name = "S&P 500 ETF"

[[events]]
date = "2025-08-08"
title = "First call"
label = "Aug 8"
url = "https://example.com/1"

[metrics]
invest_amount_usd = 500.0
"#;
        let config = PredictionConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.tickers[0].symbol, "SPY");
        assert_eq!(config.principal(), 500.0);
        assert_eq!(config.event_bindings()[0].tag, "Aug 8");
    }

    #[test]
    fn ticker_lookup_returns_position() {
        let config = PredictionConfig::from_json(SAMPLE).unwrap();
        let (index, ticker) = config.ticker("QQQ").unwrap();
        assert_eq!(index, 1);
        assert_eq!(ticker.name, "Nasdaq 100 ETF");
        assert!(config.ticker("DIA").is_none());
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let json = r#"{"tickers": [{"symbol": "SPY", "name": "a"}, {"symbol": "SPY", "name": "b"}]}"#;
        assert!(matches!(
            PredictionConfig::from_json(json),
            Err(ConfigError::DuplicateSymbol(s)) if s == "SPY"
        ));
    }

    #[test]
    fn rejects_empty_ticker_list() {
        assert!(matches!(
            PredictionConfig::from_json(r#"{"tickers": []}"#),
            Err(ConfigError::NoTickers)
        ));
    }

    #[test]
    fn rejects_non_positive_invest_amount() {
        let json = r#"{"tickers": [{"symbol": "SPY"}], "metrics": {"invest_amount_usd": 0}}"#;
        assert!(matches!(
            PredictionConfig::from_json(json),
            Err(ConfigError::InvalidInvestAmount(_))
        ));
    }

    #[test]
    fn rejects_malformed_event_date() {
        let json = r#"{"tickers": [{"symbol": "SPY"}], "events": [{"date": "Aug 8"}]}"#;
        assert!(matches!(
            PredictionConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }
}
