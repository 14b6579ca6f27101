//! Down/up verdict of the latest close against an event's resolved close.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{EventBinding, PriceSeries, Ticker};
use crate::error::CoreError;
use crate::index::{align, AlignmentResult, SortedDates};

/// Where the latest close sits relative to the resolved close.
///
/// `Down` only on a strict decrease. A tie is `Up` ("not down"): an unchanged
/// price does not confirm a call that the price would fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn from_prices(resolved: f64, latest: f64) -> Self {
        if latest < resolved {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Down => "DOWN",
            Direction::Up => "UP",
        }
    }

    /// Whether this direction matches the tracked "price will fall" claim.
    pub fn confirms_call(self) -> bool {
        self == Direction::Down
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub symbol: String,
    pub event_ordinal: usize,
    pub event_tag: String,
    pub requested_date: NaiveDate,
    pub resolved_date: NaiveDate,
    pub resolved_price: f64,
    pub latest_date: NaiveDate,
    pub latest_price: f64,
    /// `(latest - resolved) / resolved`; negative for a decrease.
    pub percent_change: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Resolved(VerdictRecord),
    /// Not counted as correct or incorrect anywhere.
    Unresolved,
}

impl Verdict {
    pub fn as_resolved(&self) -> Option<&VerdictRecord> {
        match self {
            Verdict::Resolved(r) => Some(r),
            Verdict::Unresolved => None,
        }
    }
}

/// Verdict for one (ticker, event) pair against the series' latest close.
pub fn verdict(
    ticker: &Ticker,
    series: &PriceSeries,
    sorted: &SortedDates,
    binding: &EventBinding,
) -> Result<Verdict, CoreError> {
    let alignment = align(series, sorted, binding.event.date);
    verdict_aligned(ticker, series, sorted, binding, &alignment)
}

/// Same as [`verdict`], reusing an alignment computed by the caller.
pub fn verdict_aligned(
    ticker: &Ticker,
    series: &PriceSeries,
    sorted: &SortedDates,
    binding: &EventBinding,
    alignment: &AlignmentResult,
) -> Result<Verdict, CoreError> {
    let Some(resolved) = alignment.resolved else {
        return Ok(Verdict::Unresolved);
    };
    if !resolved.price.is_finite() || resolved.price <= 0.0 {
        return Err(CoreError::InvalidPrice {
            date: resolved.date,
            price: resolved.price,
        });
    }
    let Some((latest_date, latest_price)) = sorted
        .last()
        .and_then(|date| series.get(date).map(|p| (date, p)))
    else {
        return Ok(Verdict::Unresolved);
    };
    if !latest_price.is_finite() || latest_price < 0.0 {
        return Err(CoreError::InvalidPrice {
            date: latest_date,
            price: latest_price,
        });
    }

    Ok(Verdict::Resolved(VerdictRecord {
        symbol: ticker.symbol.clone(),
        event_ordinal: binding.ordinal,
        event_tag: binding.tag.clone(),
        requested_date: alignment.requested,
        resolved_date: resolved.date,
        resolved_price: resolved.price,
        latest_date,
        latest_price,
        percent_change: (latest_price - resolved.price) / resolved.price,
        direction: Direction::from_prices(resolved.price, latest_price),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{bind_events, PredictionEvent};
    use crate::index::sorted_dates;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        points.iter().map(|(date, p)| (d(date), *p)).collect()
    }

    fn binding(date: &str) -> EventBinding {
        bind_events(&[PredictionEvent::new(d(date), "Aug 8")]).remove(0)
    }

    fn spy() -> Ticker {
        Ticker::new("SPY", "S&P 500")
    }

    #[test]
    fn tie_counts_as_up() {
        let s = series(&[("2025-08-08", 100.0), ("2025-08-11", 100.0)]);
        let sorted = sorted_dates(&s);
        let v = verdict(&spy(), &s, &sorted, &binding("2025-08-08")).unwrap();
        let record = v.as_resolved().unwrap();
        assert_eq!(record.direction, Direction::Up);
        assert_eq!(record.percent_change, 0.0);
        assert!(!record.direction.confirms_call());
    }

    #[test]
    fn strict_decrease_is_down_with_negative_change() {
        let s = series(&[("2025-08-08", 100.0), ("2025-08-11", 95.0)]);
        let sorted = sorted_dates(&s);
        let v = verdict(&spy(), &s, &sorted, &binding("2025-08-08")).unwrap();
        let record = v.as_resolved().unwrap();
        assert_eq!(record.direction, Direction::Down);
        assert!((record.percent_change + 0.05).abs() < 1e-12);
        assert_eq!(record.latest_date, d("2025-08-11"));
        assert_eq!(record.symbol, "SPY");
    }

    #[test]
    fn increase_is_up_with_positive_change() {
        let s = series(&[("2025-08-08", 100.0), ("2025-08-11", 110.0)]);
        let sorted = sorted_dates(&s);
        let record = verdict(&spy(), &s, &sorted, &binding("2025-08-08"))
            .unwrap()
            .as_resolved()
            .cloned()
            .unwrap();
        assert_eq!(record.direction, Direction::Up);
        assert!((record.percent_change - 0.1).abs() < 1e-12);
    }

    #[test]
    fn event_on_last_day_compares_against_itself() {
        let s = series(&[("2025-08-08", 100.0), ("2025-08-11", 90.0)]);
        let sorted = sorted_dates(&s);
        let record = verdict(&spy(), &s, &sorted, &binding("2025-08-09"))
            .unwrap()
            .as_resolved()
            .cloned()
            .unwrap();
        assert_eq!(record.resolved_date, record.latest_date);
        assert_eq!(record.direction, Direction::Up);
    }

    #[test]
    fn unresolved_after_last_date() {
        let s = series(&[("2025-08-08", 100.0)]);
        let sorted = sorted_dates(&s);
        let v = verdict(&spy(), &s, &sorted, &binding("2025-08-09")).unwrap();
        assert_eq!(v, Verdict::Unresolved);
    }

    #[test]
    fn zero_resolved_price_is_invalid() {
        let s = series(&[("2025-08-08", 0.0), ("2025-08-11", 1.0)]);
        let sorted = sorted_dates(&s);
        assert!(matches!(
            verdict(&spy(), &s, &sorted, &binding("2025-08-08")),
            Err(CoreError::InvalidPrice { .. })
        ));
    }
}
