//! Core computation errors.
//!
//! "No trading day on or after the event date" is not an error; it is the
//! `Unresolved` variant of the result types in `index`, `returns` and `verdict`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A price the computation depends on is non-positive (at the resolved
    /// day), negative (later), or non-finite. Never expected from a
    /// well-formed snapshot.
    #[error("invalid price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("unknown ticker '{0}'")]
    UnknownTicker(String),

    /// A per-ticker failure, tagged with the symbol it came from.
    #[error("{symbol}: {source}")]
    Ticker {
        symbol: String,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    pub fn for_ticker(self, symbol: &str) -> Self {
        match self {
            CoreError::Ticker { .. } => self,
            other => CoreError::Ticker {
                symbol: symbol.to_string(),
                source: Box::new(other),
            },
        }
    }
}
