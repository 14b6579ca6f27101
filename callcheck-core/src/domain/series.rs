//! Daily adjusted-close price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from trading day to adjusted close.
///
/// Produced by the snapshot loader or the ingest layer, never mutated by the
/// core. An empty series is valid and means "no data yet".
///
/// Uses `BTreeMap` so serialization is deterministic; consumers still go
/// through [`crate::index::sorted_dates`] rather than relying on map order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    /// An empty series, usable in `static` position.
    pub const fn empty() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price on an exact date, if that date is a trading day in this series.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(d, p)| (*d, *p))
    }

    /// Last trading day and its price.
    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        self.points.iter().next_back().map(|(d, p)| (*d, *p))
    }

    /// New series with `incoming` laid over `self`: incoming values win per date.
    pub fn merged(&self, incoming: &PriceSeries) -> PriceSeries {
        let mut points = self.points.clone();
        points.extend(incoming.iter());
        PriceSeries { points }
    }
}

impl FromIterator<(NaiveDate, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn latest_is_last_chronological_point() {
        let series: PriceSeries = [(d("2025-08-11"), 120.0), (d("2025-08-08"), 100.0)]
            .into_iter()
            .collect();
        assert_eq!(series.latest(), Some((d("2025-08-11"), 120.0)));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn empty_series_has_no_latest() {
        assert!(PriceSeries::empty().latest().is_none());
        assert!(PriceSeries::default().is_empty());
    }

    #[test]
    fn merge_prefers_incoming_values() {
        let existing: PriceSeries = [(d("2025-08-08"), 100.0), (d("2025-08-11"), 101.0)]
            .into_iter()
            .collect();
        let incoming: PriceSeries = [(d("2025-08-11"), 102.5), (d("2025-08-12"), 103.0)]
            .into_iter()
            .collect();

        let merged = existing.merged(&incoming);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(d("2025-08-08")), Some(100.0));
        assert_eq!(merged.get(d("2025-08-11")), Some(102.5));
        assert_eq!(merged.get(d("2025-08-12")), Some(103.0));
        // the receiver is untouched
        assert_eq!(existing.get(d("2025-08-11")), Some(101.0));
    }

    #[test]
    fn deserializes_from_iso_keyed_object() {
        let series: PriceSeries =
            serde_json::from_str(r#"{"2025-08-11": 120.0, "2025-08-08": 100}"#).unwrap();
        assert_eq!(series.get(d("2025-08-08")), Some(100.0));
        assert_eq!(series.latest(), Some((d("2025-08-11"), 120.0)));
    }

    #[test]
    fn rejects_malformed_date_keys() {
        let result: Result<PriceSeries, _> = serde_json::from_str(r#"{"08/11/2025": 120.0}"#);
        assert!(result.is_err());
    }
}
