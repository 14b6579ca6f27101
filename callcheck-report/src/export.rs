//! Report export: JSON and CSV artifacts built from the render passes.
//!
//! Provides:
//! - **JSON**: the grid view plus every detail view, with schema versioning
//! - **CSV**: one verdict row per (ticker, event) pair, unresolved rows marked
//!
//! Persisted bundles carry a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use callcheck_core::data::PriceSnapshot;
use callcheck_core::domain::EventBinding;
use callcheck_core::render::TickerPanel;
use callcheck_core::{render_detail, render_grid, DetailView, GridView, PredictionConfig, TickerState};

use crate::markdown::generate_report;

pub const SCHEMA_VERSION: u32 = 1;

/// Everything a report needs, rendered once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub schema_version: u32,
    /// `generated_utc` of the snapshot the report was built from.
    pub snapshot_generated_utc: Option<String>,
    pub as_of: Option<NaiveDate>,
    pub events: Vec<EventBinding>,
    pub grid: GridView,
    pub details: Vec<DetailView>,
}

impl ReportBundle {
    /// Run the grid pass and one detail pass per configured ticker.
    pub fn build(config: &PredictionConfig, snapshot: &PriceSnapshot) -> Result<Self> {
        let grid = render_grid(config, snapshot);
        let details = config
            .tickers
            .iter()
            .map(|t| {
                render_detail(config, snapshot, &t.symbol)
                    .with_context(|| format!("detail view for {}", t.symbol))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            snapshot_generated_utc: snapshot.generated_utc.clone(),
            as_of: grid.as_of,
            events: config.event_bindings(),
            grid,
            details,
        })
    }
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(bundle: &ReportBundle) -> Result<String> {
    serde_json::to_string_pretty(bundle).context("failed to serialize report to JSON")
}

/// Deserialize a bundle, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<ReportBundle> {
    let bundle: ReportBundle =
        serde_json::from_str(json).context("failed to deserialize report from JSON")?;
    if bundle.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            bundle.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(bundle)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// One row per (ticker, event) pair, tickers outer and events inner.
///
/// Columns: symbol, event, tag, requested_date, status, resolved_date,
/// resolved_price, latest_date, latest_price, percent_change, direction,
/// confirms_call
///
/// `status` is `resolved`, `unresolved`, `no_data` or `fault`; the price
/// columns are empty unless resolved.
pub fn export_verdicts_csv(grid: &GridView, events: &[EventBinding]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "symbol",
        "event",
        "tag",
        "requested_date",
        "status",
        "resolved_date",
        "resolved_price",
        "latest_date",
        "latest_price",
        "percent_change",
        "direction",
        "confirms_call",
    ])?;

    for panel in &grid.panels {
        for (i, binding) in events.iter().enumerate() {
            let symbol = panel.ticker.symbol.as_str();
            let ordinal = binding.ordinal.to_string();
            let requested = binding.event.date.to_string();
            let resolved = panel.verdicts.get(i).and_then(|v| v.as_resolved());
            match resolved {
                Some(r) => wtr.write_record([
                    symbol,
                    &ordinal,
                    &binding.tag,
                    &requested,
                    "resolved",
                    &r.resolved_date.to_string(),
                    &format!("{:.4}", r.resolved_price),
                    &r.latest_date.to_string(),
                    &format!("{:.4}", r.latest_price),
                    &format!("{:.6}", r.percent_change),
                    r.direction.label(),
                    if r.direction.confirms_call() { "true" } else { "false" },
                ])?,
                None => wtr.write_record([
                    symbol,
                    &ordinal,
                    &binding.tag,
                    &requested,
                    unresolved_status(panel),
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                ])?,
            }
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn unresolved_status(panel: &TickerPanel) -> &'static str {
    match panel.state {
        TickerState::NoData => "no_data",
        TickerState::Fault { .. } => "fault",
        TickerState::Loaded { .. } => "unresolved",
    }
}

/// Export each ticker's projections as CSV.
///
/// Columns: symbol, event, tag, final_value, total_return
pub fn export_projections_csv(details: &[DetailView]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "event", "tag", "final_value", "total_return"])?;
    for view in details {
        for p in &view.projections {
            wtr.write_record([
                view.ticker.symbol.as_str(),
                &p.ordinal.to_string(),
                &p.tag,
                &p.final_value.map(|v| format!("{v:.2}")).unwrap_or_default(),
                &p.total_return.map(|r| format!("{r:.6}")).unwrap_or_default(),
            ])?;
        }
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set under `output_dir`:
/// - `report.json` — the bundle
/// - `verdicts.csv` — verdict rows
/// - `projections.csv` — projection rows
/// - `report.md` — Markdown scorecard report
///
/// Returns `output_dir`.
pub fn save_artifacts(bundle: &ReportBundle, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create report dir: {}", output_dir.display()))?;

    std::fs::write(output_dir.join("report.json"), export_json(bundle)?)?;
    std::fs::write(
        output_dir.join("verdicts.csv"),
        export_verdicts_csv(&bundle.grid, &bundle.events)?,
    )?;
    std::fs::write(
        output_dir.join("projections.csv"),
        export_projections_csv(&bundle.details)?,
    )?;
    std::fs::write(output_dir.join("report.md"), generate_report(bundle))?;

    info!(dir = %output_dir.display(), "saved report artifacts");
    Ok(output_dir.to_path_buf())
}

/// Load a bundle from an artifact directory's `report.json`.
pub fn load_artifacts(dir: &Path) -> Result<ReportBundle> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_bundle, sample_config, sample_snapshot};

    #[test]
    fn json_roundtrip() {
        let bundle = sample_bundle();
        let json = export_json(&bundle).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back.schema_version, SCHEMA_VERSION);
        assert_eq!(back.grid.scorecard, bundle.grid.scorecard);
        assert_eq!(back.events, bundle.events);
        assert_eq!(back.details.len(), bundle.details.len());
    }

    #[test]
    fn newer_schema_rejected() {
        let mut bundle = sample_bundle();
        bundle.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&bundle).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn verdicts_csv_marks_every_pair() {
        let bundle = sample_bundle();
        let csv = export_verdicts_csv(&bundle.grid, &bundle.events).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        // header + 3 tickers x 2 events
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("symbol,event,tag,requested_date,status"));
        assert!(lines[1].starts_with("SPY,1,Aug 8,2025-08-08,resolved,2025-08-08,100.0000"));
        assert!(lines[1].ends_with("DOWN,true"));
        assert!(lines[2].starts_with("SPY,2,Sep 2,2025-09-02,unresolved,,"));
        assert!(lines[3].contains(",resolved,"));
        assert!(lines[3].ends_with("UP,false"));
        assert!(lines[5].starts_with("IWM,1,Aug 8,2025-08-08,no_data"));
    }

    #[test]
    fn projections_csv_leaves_unresolved_blank() {
        let bundle = sample_bundle();
        let csv = export_projections_csv(&bundle.details).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "symbol,event,tag,final_value,total_return");
        assert_eq!(lines[1], "SPY,1,Aug 8,900.00,-0.100000");
        assert_eq!(lines[2], "SPY,2,Sep 2,,");
    }

    #[test]
    fn save_and_load_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ReportBundle::build(&sample_config(), &sample_snapshot()).unwrap();
        let out = save_artifacts(&bundle, &dir.path().join("out")).unwrap();

        for name in ["report.json", "verdicts.csv", "projections.csv", "report.md"] {
            assert!(out.join(name).exists(), "missing {name}");
        }
        let loaded = load_artifacts(&out).unwrap();
        assert_eq!(loaded.grid.scorecard, bundle.grid.scorecard);
        assert_eq!(loaded.as_of, bundle.as_of);
    }
}
