//! Markdown scorecard report.

use callcheck_core::format;
use callcheck_core::render::as_of_text;
use callcheck_core::TickerState;

use crate::export::ReportBundle;

/// Render a bundle as a single Markdown document.
pub fn generate_report(bundle: &ReportBundle) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# CallCheck Report\n\n");

    // Metadata
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Data | {} |\n", as_of_text(bundle.as_of)));
    if let Some(generated) = &bundle.snapshot_generated_utc {
        md.push_str(&format!("| Snapshot | {generated} |\n"));
    }
    md.push_str(&format!("| Tickers | {} |\n", bundle.grid.panels.len()));
    md.push_str(&format!("| Calls | {} |\n", bundle.events.len()));
    md.push('\n');

    md.push_str(&format!("**{}**\n\n", bundle.grid.scorecard_text));

    // Calls
    if !bundle.events.is_empty() {
        md.push_str("## Calls\n\n");
        md.push_str("| # | Call | Date | Title |\n");
        md.push_str("| --- | --- | --- | --- |\n");
        for b in &bundle.events {
            let title = if b.event.url.is_empty() {
                escape(&b.event.title)
            } else {
                format!("[{}]({})", escape(&b.event.title), b.event.url)
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                b.ordinal, b.tag, b.event.date, title
            ));
        }
        md.push('\n');
    }

    // Verdicts
    md.push_str("## Verdicts\n\n");
    md.push_str("| Ticker | Call | Trading day | Then | Latest | Change | Verdict |\n");
    md.push_str("| --- | --- | --- | --- | --- | --- | --- |\n");
    for panel in &bundle.grid.panels {
        let symbol = &panel.ticker.symbol;
        match &panel.state {
            TickerState::Fault { message } => {
                md.push_str(&format!(
                    "| {symbol} | all | | | | | fault: {} |\n",
                    escape(message)
                ));
                continue;
            }
            TickerState::NoData => {
                md.push_str(&format!("| {symbol} | all | | | | | no data |\n"));
                continue;
            }
            TickerState::Loaded { .. } => {}
        }
        for (binding, verdict) in bundle.events.iter().zip(&panel.verdicts) {
            match verdict.as_resolved() {
                Some(r) => md.push_str(&format!(
                    "| {symbol} | {} | {} | {} | {} | {} | {} |\n",
                    binding.tag,
                    r.resolved_date,
                    format::usd(r.resolved_price),
                    format::usd(r.latest_price),
                    format::signed_pct(r.percent_change),
                    r.direction.label(),
                )),
                None => md.push_str(&format!(
                    "| {symbol} | {} | | | | | unresolved |\n",
                    binding.tag
                )),
            }
        }
    }
    md.push('\n');

    // Projections
    let with_projections: Vec<_> = bundle
        .details
        .iter()
        .filter(|d| !d.projections.is_empty())
        .collect();
    if !with_projections.is_empty() {
        md.push_str("## Hypothetical Investment\n\n");
        for view in with_projections {
            md.push_str(&format!("### {}\n\n", view.ticker.display_name()));
            for p in &view.projections {
                md.push_str(&format!("- {}\n", p.text));
            }
            for note in &view.notes {
                md.push_str(&format!("- _{note}_\n"));
            }
            md.push('\n');
        }
    }

    if !bundle.grid.disclaimer.is_empty() {
        md.push_str(&format!("---\n\n_{}_\n", bundle.grid.disclaimer));
    }

    md
}

fn escape(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_bundle;

    #[test]
    fn report_has_scorecard_and_tables() {
        let md = generate_report(&sample_bundle());
        assert!(md.starts_with("# CallCheck Report\n"));
        assert!(md.contains("| Data | As of 2025-08-15 |"));
        assert!(md.contains("| Snapshot | 2025-08-16 01:00:00Z |"));
        assert!(md.contains(
            "**Scorecard: 1 of 2 calls are below the prediction-day price. Down: SPY (Aug 8).**"
        ));
        assert!(md.contains("| SPY | Aug 8 | 2025-08-08 | $100.00 | $90.00 | -10.00% | DOWN |"));
        assert!(md.contains("| SPY | Sep 2 | | | | | unresolved |"));
        assert!(md.contains("| IWM | all | | | | | no data |"));
        assert!(md.contains("[First call](https://example.com/1)"));
        assert!(md.trim_end().ends_with("_Not investment advice._"));
    }

    #[test]
    fn pipes_in_titles_are_escaped() {
        let mut bundle = sample_bundle();
        bundle.events[0].event.title = "A | B".into();
        let md = generate_report(&bundle);
        assert!(md.contains("[A \\| B]"));
    }
}
