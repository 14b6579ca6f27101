//! Domain types for CallCheck

pub mod event;
pub mod series;
pub mod ticker;

pub use event::{bind_events, EventBinding, PredictionEvent, DEFAULT_EVENT_COLORS};
pub use series::PriceSeries;
pub use ticker::Ticker;
