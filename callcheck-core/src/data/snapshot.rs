//! Price snapshot document: per-symbol adjusted-close series plus provenance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::PriceSeries;

static NO_DATA: PriceSeries = PriceSeries::empty();

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub series: BTreeMap<String, PriceSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_date: Option<NaiveDate>,
}

impl PriceSnapshot {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Series for `symbol`; a missing symbol reads as an empty series.
    pub fn series_for(&self, symbol: &str) -> &PriceSeries {
        self.series.get(symbol).unwrap_or(&NO_DATA)
    }

    /// Latest trading day across the given symbols.
    pub fn as_of<'a>(&self, symbols: impl IntoIterator<Item = &'a str>) -> Option<NaiveDate> {
        symbols
            .into_iter()
            .filter_map(|s| self.series_for(s).latest().map(|(d, _)| d))
            .max()
    }

    /// Pretty JSON with sorted keys and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        // Round-trip through Value: its map is key-sorted.
        let value = serde_json::to_value(self)?;
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "series": {
            "SPY": {"2025-08-08": 100.0, "2025-08-11": 120.0},
            "QQQ": {}
        },
        "generated_utc": "2025-08-12 01:00:00Z"
    }"#;

    #[test]
    fn missing_and_empty_symbols_read_as_no_data() {
        let snapshot = PriceSnapshot::from_json(SAMPLE).unwrap();
        assert_eq!(snapshot.series_for("SPY").len(), 2);
        assert!(snapshot.series_for("QQQ").is_empty());
        assert!(snapshot.series_for("IWM").is_empty());
    }

    #[test]
    fn as_of_is_latest_across_symbols() {
        let snapshot = PriceSnapshot::from_json(SAMPLE).unwrap();
        assert_eq!(
            snapshot.as_of(["SPY", "QQQ"]),
            NaiveDate::from_ymd_opt(2025, 8, 11)
        );
        assert_eq!(snapshot.as_of(["QQQ"]), None);
    }

    #[test]
    fn empty_document_is_valid() {
        let snapshot = PriceSnapshot::from_json("{}").unwrap();
        assert!(snapshot.series.is_empty());
    }

    #[test]
    fn pretty_json_is_key_sorted_with_newline() {
        let snapshot = PriceSnapshot::from_json(SAMPLE).unwrap();
        let out = snapshot.to_pretty_json().unwrap();
        assert!(out.ends_with("}\n"));
        let generated = out.find("generated_utc").unwrap();
        let series = out.find("\"series\"").unwrap();
        assert!(generated < series);
        let qqq = out.find("QQQ").unwrap();
        let spy = out.find("SPY").unwrap();
        assert!(qqq < spy);
    }
}
