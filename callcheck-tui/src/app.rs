//! Application state — single-owner, main-thread only.
//!
//! Every reload or selection change runs a fresh render pass over the loaded
//! inputs; nothing derived is carried between passes except the chart slots.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use callcheck_core::data::{DocumentLoader, Inputs, Source};
use callcheck_core::{
    render_detail, render_grid, DetailView, GridView, TickerState, ViewFingerprint,
};

use crate::chart_slot::ChartSlot;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Grid,
    Detail,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Grid => 0,
            Panel::Detail => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Grid),
            1 => Some(Panel::Detail),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Grid => "Grid",
            Panel::Detail => "Detail",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        match self {
            Panel::Grid => Panel::Detail,
            Panel::Detail => Panel::Help,
            Panel::Help => Panel::Grid,
        }
    }

    pub fn prev(self) -> Panel {
        match self {
            Panel::Grid => Panel::Help,
            Panel::Detail => Panel::Grid,
            Panel::Help => Panel::Detail,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

const ERROR_HISTORY_CAP: usize = 50;

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,
    pub selected: usize,
    pub overlay: Overlay,

    // Inputs
    pub config_source: Source,
    pub prices_source: Source,
    loader: DocumentLoader,
    pub inputs: Option<Inputs>,

    // Views from the last successful pass
    pub grid: Option<GridView>,
    pub detail: Option<DetailView>,
    pub fingerprint: Option<ViewFingerprint>,
    /// Set when the last reload failed and the views predate it.
    pub stale: bool,

    // One slot per grid canvas, plus the detail canvas.
    pub grid_charts: Vec<ChartSlot>,
    pub detail_chart: ChartSlot,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl AppState {
    pub fn new(config_source: Source, prices_source: Source) -> Self {
        Self {
            active_panel: Panel::Grid,
            running: true,
            selected: 0,
            overlay: Overlay::None,
            config_source,
            prices_source,
            loader: DocumentLoader::default(),
            inputs: None,
            grid: None,
            detail: None,
            fingerprint: None,
            stale: false,
            grid_charts: Vec::new(),
            detail_chart: ChartSlot::new(),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        }
    }

    /// Load both documents and re-render. On failure the previous views stay
    /// up, marked stale.
    pub fn reload(&mut self) {
        match self
            .loader
            .load_inputs(&self.config_source, &self.prices_source)
        {
            Ok(inputs) => {
                self.inputs = Some(inputs);
                self.stale = false;
                self.rerender();
                if let Some(grid) = &self.grid {
                    let faults = grid
                        .panels
                        .iter()
                        .filter(|p| matches!(p.state, TickerState::Fault { .. }))
                        .count();
                    let status = grid.status.clone();
                    if faults > 0 {
                        self.set_warning(format!("{status}; {faults} ticker(s) faulted"));
                    } else {
                        self.set_status(status);
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.stale = self.grid.is_some();
                self.push_error(e.to_string(), "reload".into());
            }
        }
    }

    /// Fresh render pass over the loaded inputs.
    pub fn rerender(&mut self) {
        let Some(inputs) = &self.inputs else {
            return;
        };
        let grid = render_grid(&inputs.config, &inputs.snapshot);

        let count = grid.panels.len();
        self.selected = self.selected.min(count.saturating_sub(1));

        let detail = inputs
            .config
            .tickers
            .get(self.selected)
            .map(|t| render_detail(&inputs.config, &inputs.snapshot, &t.symbol))
            .transpose();
        let detail = match detail {
            Ok(d) => d,
            Err(e) => {
                self.push_error(e.to_string(), "detail view".into());
                None
            }
        };

        self.grid_charts.resize_with(count, ChartSlot::new);
        for (slot, panel) in self.grid_charts.iter_mut().zip(&grid.panels) {
            slot.replace(panel.chart.as_ref());
        }
        self.detail_chart
            .replace(detail.as_ref().and_then(|d| d.chart.as_ref()));

        self.fingerprint = ViewFingerprint::of(&grid).ok();
        info!(
            tickers = count,
            selected = self.selected,
            fingerprint = self.fingerprint.as_ref().map(|f| f.short()).unwrap_or(""),
            "render pass"
        );
        self.grid = Some(grid);
        self.detail = detail;
    }

    pub fn ticker_count(&self) -> usize {
        self.grid.as_ref().map(|g| g.panels.len()).unwrap_or(0)
    }

    pub fn select(&mut self, index: usize) {
        let count = self.ticker_count();
        if count == 0 || index >= count || index == self.selected {
            return;
        }
        self.selected = index;
        self.rerender();
    }

    pub fn select_next(&mut self) {
        let count = self.ticker_count();
        if count > 0 {
            self.select((self.selected + 1) % count);
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.ticker_count();
        if count > 0 {
            self.select((self.selected + count - 1) % count);
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
