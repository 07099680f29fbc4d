// Campaign Board - Core Library
// Exposes the record store, filters, aggregates, ranking and view sync for the CLI, TUI and tests

pub mod error;
pub mod store;
pub mod format;
pub mod aggregator;
pub mod ranker;
pub mod filter;
pub mod view;       // View boundary: slots, sinks, renderer
pub mod controller; // Selection state + view synchronization
pub mod config;

// Re-export commonly used types
pub use error::DataFormatError;
pub use store::{
    CampaignRecord, RecordStore,
    to_number, to_count, to_text, SAMPLE_DATA,
};
pub use aggregator::{summarize, AggregateSummary};
pub use ranker::{top_k, top_two, RankedPair};
pub use filter::FilterSelection;
pub use view::{
    Card, MemoryView, SlotKeys, ViewNode, ViewRenderer, ViewSink, ViewSlot,
    describe,
};
pub use controller::Controller;
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
