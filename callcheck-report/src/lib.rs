//! CallCheck Report — exportable artifacts built from the render passes.
//!
//! This crate builds on `callcheck-core` to provide:
//! - A schema-versioned JSON bundle of the grid and detail views
//! - Verdict and projection CSV exports
//! - A Markdown scorecard report

pub mod export;
pub mod markdown;

#[cfg(test)]
mod test_fixtures;

pub use export::{
    export_json, export_projections_csv, export_verdicts_csv, import_json, load_artifacts,
    save_artifacts, ReportBundle, SCHEMA_VERSION,
};
pub use markdown::generate_report;
