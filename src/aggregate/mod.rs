// src/aggregate/mod.rs
//
// Incremental aggregation: nodes in, per-seller counts out.

pub mod extractor;
pub mod observer;
pub mod price;
pub mod seen;
pub mod session;
pub mod table;

pub use extractor::{ListingExtractor, ListingRecord, Reject};
pub use observer::{ChangeObserver, Command, NodeSource, RenderSink, SessionHandle};
pub use price::PriceKey;
pub use seen::SeenSet;
pub use session::AggregationSession;
pub use table::{AggregationEntry, AggregationTable, TopSeller};
