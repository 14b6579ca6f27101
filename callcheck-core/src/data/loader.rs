//! Document loading: the prediction config and the price snapshot.
//!
//! A source is a local path or an `http(s)://` URL. Both documents must load
//! before anything is computed; any failure aborts the render pass.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use super::snapshot::PriceSnapshot;
use crate::config::{ConfigError, PredictionConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::parse(s)
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{u}"),
        }
    }
}

/// A document failed to load or parse.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        error: std::io::Error,
    },

    #[error("request for {source_name} failed: {reason}")]
    Http { source_name: String, reason: String },

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: String, status: u16 },

    #[error("failed to parse {source_name}: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("invalid config in {source_name}: {error}")]
    Config {
        source_name: String,
        error: ConfigError,
    },
}

/// Both input documents of a render pass.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub config: PredictionConfig,
    pub snapshot: PriceSnapshot,
}

/// Blocking document loader. The HTTP client is built on first URL use.
pub struct DocumentLoader {
    timeout: Duration,
    client: Option<reqwest::blocking::Client>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl DocumentLoader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: None,
        }
    }

    /// Raw text of a document.
    pub fn fetch_text(&mut self, source: &Source) -> Result<String, FetchError> {
        let source_name = source.to_string();
        match source {
            Source::Path(path) => {
                std::fs::read_to_string(path).map_err(|error| FetchError::Io { source_name, error })
            }
            Source::Url(url) => {
                let client = self.client(&source_name)?;
                let resp = client.get(url).send().map_err(|e| FetchError::Http {
                    source_name: source_name.clone(),
                    reason: e.to_string(),
                })?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        source_name,
                        status: status.as_u16(),
                    });
                }
                resp.text().map_err(|e| FetchError::Http {
                    source_name,
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn load_config(&mut self, source: &Source) -> Result<PredictionConfig, FetchError> {
        let text = self.fetch_text(source)?;
        let source_name = source.to_string();
        PredictionConfig::from_str_for(&source_name, &text).map_err(|error| match error {
            ConfigError::Parse(reason) => FetchError::Parse {
                source_name,
                reason,
            },
            error => FetchError::Config { source_name, error },
        })
    }

    pub fn load_snapshot(&mut self, source: &Source) -> Result<PriceSnapshot, FetchError> {
        let text = self.fetch_text(source)?;
        PriceSnapshot::from_json(&text).map_err(|e| FetchError::Parse {
            source_name: source.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load config then snapshot; the first failure aborts.
    pub fn load_inputs(&mut self, config: &Source, prices: &Source) -> Result<Inputs, FetchError> {
        let config_doc = self.load_config(config)?;
        debug!(source = %config, tickers = config_doc.tickers.len(), "loaded config");
        let snapshot = self.load_snapshot(prices)?;
        info!(
            config = %config,
            prices = %prices,
            symbols = snapshot.series.len(),
            "inputs loaded"
        );
        Ok(Inputs {
            config: config_doc,
            snapshot,
        })
    }

    fn client(&mut self, source_name: &str) -> Result<reqwest::blocking::Client, FetchError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Http {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        self.client = Some(client.clone());
        Ok(client)
    }
}
