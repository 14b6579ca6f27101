//! Render passes for the two views.
//!
//! A pass takes the config and the price snapshot and rebuilds every derived
//! structure from scratch: sorted dates, alignments, verdicts, projections,
//! annotation lines and the scorecard. Nothing survives between passes, so
//! two passes over identical inputs produce identical views.
//!
//! Per-ticker state after a pass:
//! - `NoData`: the snapshot has no points for the symbol.
//! - `Loaded { resolved_events }`: dates sorted; zero or more events resolved.
//! - `Fault`: the series holds an invalid price; the ticker degrades to text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::annotation::{build_lines, series_color, AnnotationLine};
use crate::config::PredictionConfig;
use crate::data::PriceSnapshot;
use crate::domain::{EventBinding, PriceSeries, Ticker};
use crate::error::CoreError;
use crate::format;
use crate::index::{align, sorted_dates, AlignmentResult};
use crate::returns::{project_aligned, Projection};
use crate::scorecard::Scorecard;
use crate::verdict::{verdict_aligned, Direction, Verdict};

/// Everything a line chart needs for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub symbol: String,
    pub title: String,
    /// Sorted trading days.
    pub labels: Vec<NaiveDate>,
    /// Adjusted close per label.
    pub values: Vec<f64>,
    pub color: String,
    pub annotations: Vec<AnnotationLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TickerState {
    NoData,
    Loaded { resolved_events: usize },
    Fault { message: String },
}

/// Alignment and derived results for one (ticker, event) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub binding: EventBinding,
    pub alignment: AlignmentResult,
    pub verdict: Verdict,
    pub projection: Projection,
}

/// Full per-ticker computation shared by both views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerAnalysis {
    pub ticker: Ticker,
    pub chart: ChartConfig,
    pub outcomes: Vec<EventOutcome>,
}

impl TickerAnalysis {
    pub fn state(&self) -> TickerState {
        if self.chart.labels.is_empty() {
            TickerState::NoData
        } else {
            TickerState::Loaded {
                resolved_events: self
                    .outcomes
                    .iter()
                    .filter(|o| o.alignment.is_resolved())
                    .count(),
            }
        }
    }
}

/// Align every event once and derive verdicts, projections and chart lines
/// from that single alignment.
pub fn analyze_ticker(
    ticker: &Ticker,
    ticker_index: usize,
    bindings: &[EventBinding],
    series: &PriceSeries,
    principal: f64,
) -> Result<TickerAnalysis, CoreError> {
    let sorted = sorted_dates(series);
    let alignments: Vec<AlignmentResult> = bindings
        .iter()
        .map(|b| align(series, &sorted, b.event.date))
        .collect();

    let mut outcomes = Vec::with_capacity(bindings.len());
    for (binding, alignment) in bindings.iter().zip(&alignments) {
        let verdict = verdict_aligned(ticker, series, &sorted, binding, alignment)?;
        let projection = project_aligned(series, &sorted, alignment, principal)?;
        debug!(
            symbol = %ticker.symbol,
            event = binding.ordinal,
            resolved = ?alignment.resolved_date(),
            "aligned event"
        );
        outcomes.push(EventOutcome {
            binding: binding.clone(),
            alignment: *alignment,
            verdict,
            projection,
        });
    }

    let labels = sorted.as_slice().to_vec();
    let values = labels.iter().filter_map(|d| series.get(*d)).collect();
    let chart = ChartConfig {
        symbol: ticker.symbol.clone(),
        title: format!("{} ({})", ticker.display_name(), ticker.symbol),
        labels,
        values,
        color: series_color(ticker_index).to_string(),
        annotations: build_lines(bindings, &alignments),
    };

    Ok(TickerAnalysis {
        ticker: ticker.clone(),
        chart,
        outcomes,
    })
}

// ─── Grid view ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPanel {
    pub ticker: Ticker,
    pub state: TickerState,
    pub chart: Option<ChartConfig>,
    pub verdicts: Vec<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub disclaimer: String,
    pub panels: Vec<TickerPanel>,
    pub scorecard: Scorecard,
    pub scorecard_text: String,
    pub as_of: Option<NaiveDate>,
    pub status: String,
}

/// Multi-ticker grid: one chart per ticker plus the scorecard.
pub fn render_grid(config: &PredictionConfig, snapshot: &PriceSnapshot) -> GridView {
    let bindings = config.event_bindings();
    let principal = config.principal();

    let mut panels = Vec::with_capacity(config.tickers.len());
    for (i, ticker) in config.tickers.iter().enumerate() {
        let series = snapshot.series_for(&ticker.symbol);
        let panel = match analyze_ticker(ticker, i, &bindings, series, principal) {
            Ok(analysis) => {
                let state = analysis.state();
                let chart = (state != TickerState::NoData).then(|| analysis.chart.clone());
                TickerPanel {
                    ticker: ticker.clone(),
                    state,
                    chart,
                    verdicts: analysis.outcomes.into_iter().map(|o| o.verdict).collect(),
                }
            }
            Err(e) => fault_panel(ticker, e),
        };
        panels.push(panel);
    }

    let scorecard = Scorecard::from_verdicts(panels.iter().flat_map(|p| p.verdicts.iter()));
    let as_of = snapshot.as_of(config.tickers.iter().map(|t| t.symbol.as_str()));
    debug!(
        tickers = panels.len(),
        correct = scorecard.correct,
        total = scorecard.total,
        "rendered grid"
    );

    GridView {
        disclaimer: config.disclaimer.clone(),
        scorecard_text: scorecard.summary(),
        scorecard,
        status: as_of_text(as_of),
        as_of,
        panels,
    }
}

fn fault_panel(ticker: &Ticker, e: CoreError) -> TickerPanel {
    let e = e.for_ticker(&ticker.symbol);
    warn!(error = %e, "ticker degraded to fault");
    TickerPanel {
        ticker: ticker.clone(),
        state: TickerState::Fault {
            message: e.to_string(),
        },
        chart: None,
        verdicts: Vec::new(),
    }
}

/// `As of 2025-08-11`, or a placeholder when no ticker has data.
pub fn as_of_text(as_of: Option<NaiveDate>) -> String {
    match as_of {
        Some(d) => format!("As of {d}"),
        None => "No price data yet".into(),
    }
}

// ─── Detail view ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictBanner {
    pub ordinal: usize,
    pub tag: String,
    pub title: String,
    pub url: String,
    pub color: String,
    /// `None` when the event has not resolved.
    pub direction: Option<Direction>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub ordinal: usize,
    pub tag: String,
    pub final_value: Option<f64>,
    pub total_return: Option<f64>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub disclaimer: String,
    pub ticker: Ticker,
    pub state: TickerState,
    pub chart: Option<ChartConfig>,
    pub banners: Vec<VerdictBanner>,
    pub projections: Vec<ProjectionSummary>,
    /// One note per event whose trading day differs from its nominal date.
    pub notes: Vec<String>,
    pub as_of: Option<NaiveDate>,
    pub status: String,
}

/// Single-ticker detail: chart, one banner and one projection per event.
pub fn render_detail(
    config: &PredictionConfig,
    snapshot: &PriceSnapshot,
    symbol: &str,
) -> Result<DetailView, CoreError> {
    let (index, ticker) = config
        .ticker(symbol)
        .ok_or_else(|| CoreError::UnknownTicker(symbol.to_string()))?;

    let bindings = config.event_bindings();
    let principal = config.principal();
    let series = snapshot.series_for(&ticker.symbol);
    let as_of = series.latest().map(|(d, _)| d);

    let mut view = DetailView {
        disclaimer: config.disclaimer.clone(),
        ticker: ticker.clone(),
        state: TickerState::NoData,
        chart: None,
        banners: Vec::new(),
        projections: Vec::new(),
        notes: Vec::new(),
        as_of,
        status: as_of_text(as_of),
    };

    let analysis = match analyze_ticker(ticker, index, &bindings, series, principal) {
        Ok(analysis) => analysis,
        Err(e) => {
            let e = e.for_ticker(&ticker.symbol);
            warn!(error = %e, "detail view degraded to fault");
            view.state = TickerState::Fault {
                message: e.to_string(),
            };
            return Ok(view);
        }
    };

    view.state = analysis.state();
    if view.state != TickerState::NoData {
        view.chart = Some(analysis.chart.clone());
    }
    for outcome in &analysis.outcomes {
        view.banners.push(banner(ticker, outcome));
        view.projections.push(projection_summary(outcome, principal));
        if let Some(note) = shift_note(outcome) {
            view.notes.push(note);
        }
    }
    debug!(symbol, state = ?view.state, "rendered detail");
    Ok(view)
}

fn banner(ticker: &Ticker, outcome: &EventOutcome) -> VerdictBanner {
    let binding = &outcome.binding;
    let (direction, text) = match outcome.verdict.as_resolved() {
        Some(r) => (
            Some(r.direction),
            format!(
                "{} call: {} is {} {} since {} ({} on {}, {} on {}).",
                binding.tag,
                ticker.symbol,
                r.direction.label(),
                format::abs_pct(r.percent_change),
                r.resolved_date,
                format::usd(r.resolved_price),
                r.resolved_date,
                format::usd(r.latest_price),
                r.latest_date,
            ),
        ),
        None => (
            None,
            format!(
                "{} call: no trading day on or after {} yet.",
                binding.tag, binding.event.date
            ),
        ),
    };
    VerdictBanner {
        ordinal: binding.ordinal,
        tag: binding.tag.clone(),
        title: binding.event.title.clone(),
        url: binding.event.url.clone(),
        color: binding.color.clone(),
        direction,
        text,
    }
}

fn projection_summary(outcome: &EventOutcome, principal: f64) -> ProjectionSummary {
    let binding = &outcome.binding;
    let amount = format::usd_compact(principal);
    match outcome.projection.as_resolved() {
        Some(p) => ProjectionSummary {
            ordinal: binding.ordinal,
            tag: binding.tag.clone(),
            final_value: Some(p.final_value),
            total_return: Some(p.total_return),
            text: format!(
                "{amount} invested at the {} call ({}) is worth {} ({}).",
                binding.tag,
                p.resolved_date,
                format::usd(p.final_value),
                format::signed_pct(p.total_return),
            ),
        },
        None => ProjectionSummary {
            ordinal: binding.ordinal,
            tag: binding.tag.clone(),
            final_value: None,
            total_return: None,
            text: format!("{amount} invested at the {} call: not available yet.", binding.tag),
        },
    }
}

fn shift_note(outcome: &EventOutcome) -> Option<String> {
    if !outcome.alignment.is_shifted() {
        return None;
    }
    let resolved = outcome.alignment.resolved_date()?;
    Some(format!(
        "{} call was made on {}, not a trading day; using the {} close.",
        outcome.binding.tag, outcome.alignment.requested, resolved
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionEvent;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        points.iter().map(|(date, p)| (d(date), *p)).collect()
    }

    fn config() -> PredictionConfig {
        PredictionConfig {
            disclaimer: "Not advice.".into(),
            tickers: vec![
                Ticker::new("SPY", "S&P 500"),
                Ticker::new("QQQ", "Nasdaq 100"),
                Ticker::new("IWM", "Russell 2000"),
            ],
            events: vec![
                PredictionEvent::new(d("2025-08-09"), "Aug 9"),
                PredictionEvent::new(d("2025-09-02"), "Sep 2"),
            ],
            metrics: Default::default(),
            data_window: Default::default(),
            data_source: Default::default(),
        }
    }

    fn snapshot() -> PriceSnapshot {
        let mut snapshot = PriceSnapshot::default();
        snapshot.series.insert(
            "SPY".into(),
            series(&[("2025-08-08", 100.0), ("2025-08-11", 110.0), ("2025-08-12", 99.0)]),
        );
        snapshot
            .series
            .insert("QQQ".into(), series(&[("2025-08-11", 0.0), ("2025-08-12", 1.0)]));
        snapshot
    }

    #[test]
    fn grid_distinguishes_ticker_states() {
        let view = render_grid(&config(), &snapshot());
        assert_eq!(view.panels[0].state, TickerState::Loaded { resolved_events: 1 });
        assert!(matches!(view.panels[1].state, TickerState::Fault { .. }));
        assert_eq!(view.panels[2].state, TickerState::NoData);
        assert!(view.panels[2].chart.is_none());
        assert_eq!(view.as_of, Some(d("2025-08-12")));
        assert_eq!(view.status, "As of 2025-08-12");
    }

    #[test]
    fn grid_scorecard_uses_shared_alignment() {
        let view = render_grid(&config(), &snapshot());
        // SPY: Aug 9 resolves to Aug 11 at 110, latest 99 → down.
        assert_eq!(view.scorecard.correct, 1);
        assert_eq!(view.scorecard.total, 1);
        let chart = view.panels[0].chart.as_ref().unwrap();
        assert_eq!(chart.annotations.len(), 1);
        assert_eq!(chart.annotations[0].price, 110.0);
        assert_eq!(chart.values, vec![100.0, 110.0, 99.0]);
    }

    #[test]
    fn loaded_with_zero_resolved_events_keeps_chart() {
        let mut snapshot = PriceSnapshot::default();
        snapshot
            .series
            .insert("SPY".into(), series(&[("2025-08-01", 100.0)]));
        let view = render_grid(&config(), &snapshot);
        assert_eq!(view.panels[0].state, TickerState::Loaded { resolved_events: 0 });
        let chart = view.panels[0].chart.as_ref().unwrap();
        assert!(chart.annotations.is_empty());
        assert_eq!(view.scorecard.total, 0);
    }

    #[test]
    fn detail_has_banner_projection_and_shift_note() {
        let view = render_detail(&config(), &snapshot(), "SPY").unwrap();
        assert_eq!(view.banners.len(), 2);
        assert_eq!(view.banners[0].direction, Some(Direction::Down));
        assert_eq!(view.banners[1].direction, None);
        assert!(view.banners[0].text.contains("DOWN 10.00%"));

        assert_eq!(view.projections.len(), 2);
        let p = &view.projections[0];
        assert!((p.final_value.unwrap() - 900.0).abs() < 1e-9);
        assert!(p.text.contains("$1,000 invested at the Aug 9 call (2025-08-11)"));
        assert!(p.text.contains("-10.00%"));
        assert_eq!(view.projections[1].final_value, None);

        assert_eq!(view.notes.len(), 1);
        assert!(view.notes[0].contains("2025-08-09"));
        assert!(view.notes[0].contains("2025-08-11"));
    }

    #[test]
    fn detail_of_unknown_ticker_is_an_error() {
        assert_eq!(
            render_detail(&config(), &snapshot(), "TSLA").unwrap_err(),
            CoreError::UnknownTicker("TSLA".into())
        );
    }

    #[test]
    fn detail_of_faulty_ticker_degrades_to_text() {
        let view = render_detail(&config(), &snapshot(), "QQQ").unwrap();
        match &view.state {
            TickerState::Fault { message } => assert!(message.starts_with("QQQ:")),
            other => panic!("expected fault, got {other:?}"),
        }
        assert!(view.chart.is_none());
        assert!(view.banners.is_empty());
    }

    #[test]
    fn detail_without_data_has_placeholders() {
        let view = render_detail(&config(), &snapshot(), "IWM").unwrap();
        assert_eq!(view.state, TickerState::NoData);
        assert!(view.chart.is_none());
        assert_eq!(view.status, "No price data yet");
        assert!(view.banners.iter().all(|b| b.direction.is_none()));
        assert!(view.projections.iter().all(|p| p.final_value.is_none()));
    }

    #[test]
    fn render_is_idempotent() {
        let a = render_grid(&config(), &snapshot());
        let b = render_grid(&config(), &snapshot());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
