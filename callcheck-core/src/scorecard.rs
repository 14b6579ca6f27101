//! Scorecard: how many (ticker, event) pairs moved the way the call said.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::PriceSnapshot;
use crate::domain::{EventBinding, Ticker};
use crate::error::CoreError;
use crate::index::sorted_dates;
use crate::verdict::{verdict, Verdict};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardMatch {
    pub symbol: String,
    pub event_tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub correct: usize,
    pub total: usize,
    /// Pairs that confirmed the call, tickers outer and events inner, in
    /// config order.
    pub matches: Vec<ScorecardMatch>,
}

impl Scorecard {
    /// Count one verdict. Unresolved verdicts are ignored.
    pub fn record(&mut self, v: &Verdict) {
        let Some(record) = v.as_resolved() else {
            return;
        };
        self.total += 1;
        if record.direction.confirms_call() {
            self.correct += 1;
            self.matches.push(ScorecardMatch {
                symbol: record.symbol.clone(),
                event_tag: record.event_tag.clone(),
            });
        }
    }

    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a Verdict>) -> Self {
        let mut card = Scorecard::default();
        for v in verdicts {
            card.record(v);
        }
        card
    }

    /// One-line summary shown under the grid.
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return "Scorecard: no calls can be scored yet.".into();
        }
        let mut text = format!(
            "Scorecard: {} of {} calls are below the prediction-day price.",
            self.correct, self.total
        );
        if !self.matches.is_empty() {
            let list: Vec<String> = self
                .matches
                .iter()
                .map(|m| format!("{} ({})", m.symbol, m.event_tag))
                .collect();
            text.push_str(" Down: ");
            text.push_str(&list.join(", "));
            text.push('.');
        }
        text
    }
}

/// Score every (ticker, event) pair. The first ticker with an invalid price
/// fails the whole aggregate.
pub fn aggregate(
    tickers: &[Ticker],
    bindings: &[EventBinding],
    snapshot: &PriceSnapshot,
) -> Result<Scorecard, CoreError> {
    let mut card = Scorecard::default();
    for ticker in tickers {
        for v in ticker_verdicts(ticker, bindings, snapshot)? {
            card.record(&v);
        }
    }
    Ok(card)
}

/// Score every pair, skipping tickers whose data is invalid. The skipped
/// tickers are returned alongside the scorecard.
pub fn aggregate_lenient(
    tickers: &[Ticker],
    bindings: &[EventBinding],
    snapshot: &PriceSnapshot,
) -> (Scorecard, Vec<CoreError>) {
    let mut card = Scorecard::default();
    let mut faults = Vec::new();
    for ticker in tickers {
        match ticker_verdicts(ticker, bindings, snapshot) {
            Ok(verdicts) => verdicts.iter().for_each(|v| card.record(v)),
            Err(e) => {
                warn!(symbol = %ticker.symbol, error = %e, "excluding ticker from scorecard");
                faults.push(e);
            }
        }
    }
    (card, faults)
}

fn ticker_verdicts(
    ticker: &Ticker,
    bindings: &[EventBinding],
    snapshot: &PriceSnapshot,
) -> Result<Vec<Verdict>, CoreError> {
    let series = snapshot.series_for(&ticker.symbol);
    let sorted = sorted_dates(series);
    bindings
        .iter()
        .map(|b| verdict(ticker, series, &sorted, b).map_err(|e| e.for_ticker(&ticker.symbol)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{bind_events, PredictionEvent, PriceSeries};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        points.iter().map(|(date, p)| (d(date), *p)).collect()
    }

    fn tickers() -> Vec<Ticker> {
        vec![Ticker::new("SPY", "S&P 500"), Ticker::new("QQQ", "Nasdaq 100")]
    }

    fn bindings() -> Vec<EventBinding> {
        bind_events(&[
            PredictionEvent::new(d("2025-08-08"), "Aug 8"),
            PredictionEvent::new(d("2025-09-02"), "Sep 2"),
        ])
    }

    #[test]
    fn unresolved_pairs_are_excluded_from_total() {
        // SPY resolves only the first event and is down; QQQ has no data.
        let mut snapshot = PriceSnapshot::default();
        snapshot.series.insert(
            "SPY".into(),
            series(&[("2025-08-08", 100.0), ("2025-08-11", 90.0)]),
        );

        let card = aggregate(&tickers(), &bindings(), &snapshot).unwrap();
        assert_eq!(card.correct, 1);
        assert_eq!(card.total, 1);
        assert_eq!(
            card.matches,
            vec![ScorecardMatch {
                symbol: "SPY".into(),
                event_tag: "Aug 8".into()
            }]
        );
    }

    #[test]
    fn match_order_follows_tickers_then_events() {
        let mut snapshot = PriceSnapshot::default();
        let falling = series(&[
            ("2025-08-08", 100.0),
            ("2025-09-02", 95.0),
            ("2025-09-03", 90.0),
        ]);
        snapshot.series.insert("SPY".into(), falling.clone());
        snapshot.series.insert("QQQ".into(), falling);

        let card = aggregate(&tickers(), &bindings(), &snapshot).unwrap();
        assert_eq!(card.total, 4);
        assert_eq!(card.correct, 4);
        let order: Vec<(String, String)> = card
            .matches
            .iter()
            .map(|m| (m.symbol.clone(), m.event_tag.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("SPY".into(), "Aug 8".into()),
                ("SPY".into(), "Sep 2".into()),
                ("QQQ".into(), "Aug 8".into()),
                ("QQQ".into(), "Sep 2".into()),
            ]
        );
    }

    #[test]
    fn invalid_price_fails_strict_and_is_skipped_lenient() {
        let mut snapshot = PriceSnapshot::default();
        snapshot.series.insert(
            "SPY".into(),
            series(&[("2025-08-08", 0.0), ("2025-08-11", 90.0)]),
        );
        snapshot.series.insert(
            "QQQ".into(),
            series(&[("2025-08-08", 100.0), ("2025-08-11", 90.0)]),
        );

        let err = aggregate(&tickers(), &bindings(), &snapshot).unwrap_err();
        assert!(err.to_string().starts_with("SPY:"));

        let (card, faults) = aggregate_lenient(&tickers(), &bindings(), &snapshot);
        assert_eq!(faults.len(), 1);
        assert_eq!(card.total, 1);
        assert_eq!(card.correct, 1);
    }

    #[test]
    fn summary_text() {
        assert_eq!(
            Scorecard::default().summary(),
            "Scorecard: no calls can be scored yet."
        );
        let card = Scorecard {
            correct: 1,
            total: 2,
            matches: vec![ScorecardMatch {
                symbol: "SPY".into(),
                event_tag: "Aug 8".into(),
            }],
        };
        assert_eq!(
            card.summary(),
            "Scorecard: 1 of 2 calls are below the prediction-day price. Down: SPY (Aug 8)."
        );
    }
}
