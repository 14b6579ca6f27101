//! Chart ownership for one canvas.
//!
//! A canvas holds at most one live chart. Installing a new chart disposes the
//! previous one first, so repeated render passes never stack instances on the
//! same canvas.

use callcheck_core::annotation::AnnotationLine;
use callcheck_core::render::ChartConfig;
use chrono::NaiveDate;
use tracing::debug;

/// A chart built from a `ChartConfig`, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub generation: u64,
    pub title: String,
    pub color: String,
    /// `(x, price)` with x the trading-day index.
    pub points: Vec<(f64, f64)>,
    /// One horizontal segment per annotation, spanning the full x range.
    pub lines: Vec<(AnnotationLine, [(f64, f64); 2])>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartInstance {
    fn build(generation: u64, config: &ChartConfig) -> Self {
        let points: Vec<(f64, f64)> = config
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        let x_max = points.len().saturating_sub(1).max(1) as f64;

        let lines = config
            .annotations
            .iter()
            .map(|a| (a.clone(), [(0.0, a.price), (x_max, a.price)]))
            .collect();

        let (lo, hi) = config
            .values
            .iter()
            .copied()
            .chain(config.annotations.iter().map(|a| a.price))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let y_bounds = if lo.is_finite() && hi.is_finite() {
            let pad = ((hi - lo).abs() * 0.05).max(0.01);
            [lo - pad, hi + pad]
        } else {
            [0.0, 1.0]
        };

        Self {
            generation,
            title: config.title.clone(),
            color: config.color.clone(),
            points,
            lines,
            first_date: config.labels.first().copied(),
            last_date: config.labels.last().copied(),
            x_bounds: [0.0, x_max],
            y_bounds,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartInstance>,
    installed: u64,
    disposed: u64,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the current chart (if any), then build and install a new one.
    pub fn install(&mut self, config: &ChartConfig) -> &ChartInstance {
        self.dispose();
        self.installed += 1;
        debug!(generation = self.installed, title = %config.title, "chart installed");
        self.current.insert(ChartInstance::build(self.installed, config))
    }

    /// Install `config`, or just dispose when there is nothing to show.
    pub fn replace(&mut self, config: Option<&ChartConfig>) {
        match config {
            Some(c) => {
                self.install(c);
            }
            None => self.dispose(),
        }
    }

    pub fn dispose(&mut self) {
        if let Some(old) = self.current.take() {
            self.disposed += 1;
            debug!(generation = old.generation, "chart disposed");
        }
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.current.as_ref()
    }

    /// Charts alive on this canvas; never more than one.
    pub fn live(&self) -> u64 {
        self.installed - self.disposed
    }

    pub fn installed(&self) -> u64 {
        self.installed
    }
}
