//! CallCheck TUI — terminal view of market calls against realized prices.
//!
//! Panels:
//! 1. Grid — one chart per ticker with call lines, plus the scorecard
//! 2. Detail — selected ticker's chart, verdict banners and projections
//! 3. Help — keyboard shortcuts and input sources

pub mod app;
pub mod chart_slot;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::{AppState, Panel};
pub use chart_slot::{ChartInstance, ChartSlot};
