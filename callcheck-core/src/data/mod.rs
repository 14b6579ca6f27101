//! Input documents: loading, the price snapshot, and its refresh from the provider.

pub mod ingest;
pub mod loader;
pub mod snapshot;

pub use ingest::{
    extract_adjusted_close, refresh_snapshot_file, update_snapshot, write_snapshot,
    AlphaVantageProvider, DailySeriesProvider, IngestError, SymbolUpdate, UpdateSummary,
};
pub use loader::{DocumentLoader, FetchError, Inputs, Source};
pub use snapshot::PriceSnapshot;
