//! Snapshot refresh: pull daily adjusted closes from the provider, merge them
//! into the existing price snapshot, and write it back.
//!
//! This is the only code path that writes anything; the render passes only
//! read the snapshot it produces.

use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::snapshot::PriceSnapshot;
use crate::config::PredictionConfig;
use crate::domain::PriceSeries;

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const TIME_SERIES_KEY: &str = "Time Series (Daily)";
const THROTTLE_KEYS: [&str; 2] = ["Note", "Information"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing API key (set ALPHAVANTAGE_API_KEY)")]
    MissingApiKey,

    #[error("network error for {symbol}: {reason}")]
    Network { symbol: String, reason: String },

    #[error("provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("provider throttled the request for {symbol}: {message}")]
    Throttled { symbol: String, message: String },

    #[error("unexpected provider response for {symbol}: keys={keys:?}")]
    UnexpectedResponse { symbol: String, keys: Vec<String> },

    #[error("failed to read existing snapshot: {0}")]
    ReadSnapshot(String),

    #[error("failed to write snapshot: {0}")]
    WriteSnapshot(String),
}

/// Source of raw daily time-series documents, one symbol at a time.
pub trait DailySeriesProvider {
    fn name(&self) -> &str;

    fn fetch_daily(&self, symbol: &str) -> Result<Value, IngestError>;
}

/// Alpha Vantage `TIME_SERIES_DAILY_ADJUSTED`, full output size.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, IngestError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(IngestError::MissingApiKey);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| IngestError::Network {
                symbol: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client, api_key })
    }

    /// Build from `ALPHAVANTAGE_API_KEY`.
    pub fn from_env() -> Result<Self, IngestError> {
        let key = std::env::var("ALPHAVANTAGE_API_KEY").unwrap_or_default();
        Self::new(key)
    }
}

impl DailySeriesProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    fn fetch_daily(&self, symbol: &str) -> Result<Value, IngestError> {
        let network = |e: reqwest::Error| IngestError::Network {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        };
        self.client
            .get(ALPHA_VANTAGE_URL)
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(network)?
            .json::<Value>()
            .map_err(network)
    }
}

/// Pull `field` out of a daily time-series response, keeping dates on or
/// after `earliest`. Entries whose value does not parse, or is not a finite
/// non-negative price, are skipped.
pub fn extract_adjusted_close(
    symbol: &str,
    response: &Value,
    field: &str,
    earliest: NaiveDate,
) -> Result<PriceSeries, IngestError> {
    if let Some(msg) = response.get("Error Message") {
        return Err(IngestError::Provider {
            symbol: symbol.to_string(),
            message: value_text(msg),
        });
    }
    if let Some(msg) = THROTTLE_KEYS.iter().find_map(|k| response.get(*k)) {
        return Err(IngestError::Throttled {
            symbol: symbol.to_string(),
            message: value_text(msg),
        });
    }
    let Some(days) = response.get(TIME_SERIES_KEY).and_then(Value::as_object) else {
        let keys = response
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        return Err(IngestError::UnexpectedResponse {
            symbol: symbol.to_string(),
            keys,
        });
    };

    let series = days
        .iter()
        .filter_map(|(key, fields)| {
            let date = match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    debug!(symbol, key = %key, "skipping malformed date key");
                    return None;
                }
            };
            if date < earliest {
                return None;
            }
            let price = match fields.get(field)? {
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                Value::Number(n) => n.as_f64()?,
                _ => return None,
            };
            if !price.is_finite() || price < 0.0 {
                debug!(symbol, %date, price, "skipping invalid price");
                return None;
            }
            Some((date, price))
        })
        .collect();
    Ok(series)
}

fn value_text(v: &Value) -> String {
    v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolUpdate {
    pub symbol: String,
    pub points_before: usize,
    pub points_after: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub symbols: Vec<SymbolUpdate>,
}

impl UpdateSummary {
    pub fn any_changed(&self) -> bool {
        self.symbols.iter().any(|s| s.changed)
    }
}

/// Fetch every configured ticker and merge into `snapshot`.
///
/// Incoming values override existing ones per date. Provenance fields are
/// restamped on every run. `throttle` is slept between requests.
pub fn update_snapshot(
    config: &PredictionConfig,
    snapshot: &mut PriceSnapshot,
    provider: &dyn DailySeriesProvider,
    throttle: Duration,
    now: DateTime<Utc>,
) -> Result<UpdateSummary, IngestError> {
    let earliest = config.data_window.earliest_date;
    let field = config.data_source.field.as_str();
    let total = config.tickers.len();
    let mut summary = UpdateSummary::default();

    for (i, ticker) in config.tickers.iter().enumerate() {
        let symbol = ticker.symbol.as_str();
        info!("Fetching {symbol} ({}/{total}) from {}", i + 1, provider.name());
        let response = provider.fetch_daily(symbol)?;
        let incoming = extract_adjusted_close(symbol, &response, field, earliest)?;

        let existing = snapshot.series_for(symbol).clone();
        let merged = existing.merged(&incoming);
        let changed = merged != existing;
        if changed {
            info!(
                "{symbol}: {} -> {} points (earliest kept: {earliest})",
                existing.len(),
                merged.len()
            );
        } else {
            info!("{symbol}: no changes ({} points)", existing.len());
        }
        summary.symbols.push(SymbolUpdate {
            symbol: symbol.to_string(),
            points_before: existing.len(),
            points_after: merged.len(),
            changed,
        });
        if changed {
            snapshot.series.insert(symbol.to_string(), merged);
        }

        if i + 1 < total && !throttle.is_zero() {
            thread::sleep(throttle);
        }
    }

    snapshot.generated_utc = Some(now.format("%Y-%m-%d %H:%M:%SZ").to_string());
    snapshot.provider = Some(config.data_source.provider.clone());
    snapshot.endpoint = Some(config.data_source.endpoint.clone());
    snapshot.field = Some(config.data_source.field.clone());
    snapshot.earliest_date = Some(earliest);
    Ok(summary)
}

/// Read the snapshot at `path` (or start empty), update it, and write it back
/// when data changed or the file did not exist. Returns whether it wrote.
pub fn refresh_snapshot_file(
    path: &Path,
    config: &PredictionConfig,
    provider: &dyn DailySeriesProvider,
    throttle: Duration,
) -> Result<(UpdateSummary, bool), IngestError> {
    let existed = path.exists();
    let mut snapshot = if existed {
        let text =
            std::fs::read_to_string(path).map_err(|e| IngestError::ReadSnapshot(e.to_string()))?;
        PriceSnapshot::from_json(&text).map_err(|e| IngestError::ReadSnapshot(e.to_string()))?
    } else {
        PriceSnapshot::default()
    };

    let summary = update_snapshot(config, &mut snapshot, provider, throttle, Utc::now())?;

    if summary.any_changed() || !existed {
        write_snapshot(path, &snapshot)?;
        if existed {
            info!("Wrote updated data to {}", path.display());
        } else {
            info!("Wrote initial data to {}", path.display());
        }
        Ok((summary, true))
    } else {
        info!("No data changes; leaving {} untouched", path.display());
        Ok((summary, false))
    }
}

/// Pretty, key-sorted JSON; parent directories are created as needed.
pub fn write_snapshot(path: &Path, snapshot: &PriceSnapshot) -> Result<(), IngestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| IngestError::WriteSnapshot(e.to_string()))?;
        }
    }
    let json = snapshot
        .to_pretty_json()
        .map_err(|e| IngestError::WriteSnapshot(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| IngestError::WriteSnapshot(e.to_string()))
}
