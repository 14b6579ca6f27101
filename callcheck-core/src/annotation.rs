//! Horizontal reference lines marking each call's resolved price on a chart.

use serde::{Deserialize, Serialize};

use crate::domain::EventBinding;
use crate::format;
use crate::index::AlignmentResult;

/// Line colors for per-ticker grid charts, cycled by ticker index.
pub const SERIES_PALETTE: [&str; 5] = ["#1f77b4", "#2ca02c", "#ff7f0e", "#17becf", "#8c564b"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLine {
    pub price: f64,
    pub label: String,
    pub color: String,
}

/// Series color for the chart of the ticker at `ticker_index`.
pub fn series_color(ticker_index: usize) -> &'static str {
    SERIES_PALETTE[ticker_index % SERIES_PALETTE.len()]
}

/// One line per event whose alignment resolved to a finite price.
///
/// `bindings` and `alignments` are paired positionally; the renderer assumes
/// every returned line has a usable price.
pub fn build_lines(bindings: &[EventBinding], alignments: &[AlignmentResult]) -> Vec<AnnotationLine> {
    bindings
        .iter()
        .zip(alignments)
        .filter_map(|(binding, alignment)| {
            let price = alignment.resolved_price()?;
            if !price.is_finite() {
                return None;
            }
            Some(AnnotationLine {
                price,
                label: format!("{} call: {}", binding.tag, format::usd(price)),
                color: binding.color.clone(),
            })
        })
        .collect()
}
