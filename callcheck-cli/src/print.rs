//! Plain-text rendering of the views for the terminal.

use std::fmt::Write;

use callcheck_core::format;
use callcheck_core::render::{ChartConfig, TickerPanel};
use callcheck_core::{DetailView, EventBinding, GridView, TickerState};

pub fn grid_text(grid: &GridView, events: &[EventBinding]) -> String {
    let mut out = String::new();
    for panel in &grid.panels {
        ticker_block(&mut out, panel, events);
    }
    let _ = writeln!(out, "{}", grid.scorecard_text);
    if !grid.disclaimer.is_empty() {
        let _ = writeln!(out, "{}", grid.disclaimer);
    }
    let _ = writeln!(out, "{}", grid.status);
    out
}

fn ticker_block(out: &mut String, panel: &TickerPanel, events: &[EventBinding]) {
    let _ = writeln!(
        out,
        "{:<6} {}  [{}]",
        panel.ticker.symbol,
        panel.ticker.display_name(),
        state_text(&panel.state)
    );
    if let Some(chart) = &panel.chart {
        chart_lines(out, chart);
    }
    for (binding, verdict) in events.iter().zip(&panel.verdicts) {
        match verdict.as_resolved() {
            Some(r) => {
                let _ = writeln!(
                    out,
                    "  {:<8} {:<4} {:>8}  {} on {} -> {} on {}",
                    binding.tag,
                    r.direction.label(),
                    format::signed_pct(r.percent_change),
                    format::usd(r.resolved_price),
                    r.resolved_date,
                    format::usd(r.latest_price),
                    r.latest_date,
                );
            }
            None => {
                let _ = writeln!(out, "  {:<8} unresolved", binding.tag);
            }
        }
    }
    out.push('\n');
}

fn chart_lines(out: &mut String, chart: &ChartConfig) {
    if let (Some(first), Some(last)) = (chart.labels.first(), chart.labels.last()) {
        let _ = writeln!(
            out,
            "  {} points {} .. {}, color {}",
            chart.labels.len(),
            first,
            last,
            chart.color
        );
    }
    for a in &chart.annotations {
        let _ = writeln!(out, "  line {} ({})", a.label, a.color);
    }
}

pub fn state_text(state: &TickerState) -> String {
    match state {
        TickerState::NoData => "no data yet".into(),
        TickerState::Loaded { resolved_events } => format!("{resolved_events} resolved"),
        TickerState::Fault { message } => format!("fault: {message}"),
    }
}

pub fn detail_text(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})  [{}]",
        view.ticker.display_name(),
        view.ticker.symbol,
        state_text(&view.state)
    );
    if let Some(chart) = &view.chart {
        chart_lines(&mut out, chart);
    }
    out.push('\n');
    for b in &view.banners {
        let _ = writeln!(out, "{}", b.text);
        if !b.title.is_empty() {
            let _ = writeln!(out, "  {}", b.title);
        }
        if !b.url.is_empty() {
            let _ = writeln!(out, "  {}", b.url);
        }
    }
    if !view.projections.is_empty() {
        out.push('\n');
    }
    for p in &view.projections {
        let _ = writeln!(out, "{}", p.text);
    }
    for note in &view.notes {
        let _ = writeln!(out, "Note: {note}");
    }
    out.push('\n');
    if !view.disclaimer.is_empty() {
        let _ = writeln!(out, "{}", view.disclaimer);
    }
    let _ = writeln!(out, "{}", view.status);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use callcheck_core::data::PriceSnapshot;
    use callcheck_core::{render_detail, render_grid, PredictionConfig};

    fn inputs() -> (PredictionConfig, PriceSnapshot) {
        let config = PredictionConfig::from_json(
            r#"{"disclaimer": "Not advice.",
                "tickers": [{"symbol": "SPY", "name": "S&P 500"}, {"symbol": "DIA", "name": "Dow"}],
                "events": [{"date": "2025-08-08", "label": "Aug 8"}, {"date": "2026-01-05", "label": "Jan 5"}]}"#,
        )
        .unwrap();
        let snapshot = PriceSnapshot::from_json(
            r#"{"series": {"SPY": {"2025-08-08": 100.0, "2025-08-15": 110.0}}}"#,
        )
        .unwrap();
        (config, snapshot)
    }

    #[test]
    fn grid_text_lists_states_and_verdicts() {
        let (config, snapshot) = inputs();
        let text = grid_text(&render_grid(&config, &snapshot), &config.event_bindings());
        assert!(text.contains("SPY    S&P 500  [1 resolved]"));
        assert!(text.contains("UP    +10.00%"));
        assert!(text.contains("Jan 5    unresolved"));
        assert!(text.contains("DIA    Dow  [no data yet]"));
        assert!(text.contains("Scorecard: 0 of 1 calls"));
        assert!(text.trim_end().ends_with("As of 2025-08-15"));
    }

    #[test]
    fn detail_text_has_banners_and_projections() {
        let (config, snapshot) = inputs();
        let text = detail_text(&render_detail(&config, &snapshot, "SPY").unwrap());
        assert!(text.contains("Aug 8 call: SPY is UP 10.00%"));
        assert!(text.contains("is worth $1,100.00 (+10.00%)"));
        assert!(text.contains("Not advice."));
    }
}
