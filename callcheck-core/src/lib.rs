//! CallCheck Core — date alignment, returns, verdicts, scorecard, chart annotations.
//!
//! This crate holds everything the views need that is not drawing:
//! - Domain types (tickers, prediction events, price series)
//! - Date alignment of an event onto the first trading day on or after it
//! - Hypothetical investment projections and down/up verdicts
//! - Scorecard aggregation across tickers and events
//! - Horizontal annotation lines for each call's resolved price
//! - Render passes producing the grid and detail views
//! - Loading of the config and price snapshot, and refreshing the snapshot

pub mod annotation;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod index;
pub mod render;
pub mod returns;
pub mod scorecard;
pub mod verdict;

pub use config::{ConfigError, PredictionConfig};
pub use data::{DocumentLoader, FetchError, Inputs, PriceSnapshot, Source};
pub use domain::{EventBinding, PredictionEvent, PriceSeries, Ticker};
pub use error::CoreError;
pub use fingerprint::ViewFingerprint;
pub use render::{render_detail, render_grid, DetailView, GridView, TickerState};
pub use scorecard::Scorecard;
pub use verdict::{Direction, Verdict};
