pub mod analytics;
pub mod error;
pub mod export;
pub mod index;
pub mod ingest;
pub mod normalize;
pub mod search;

pub use analytics::{ChannelCount, DateRange, Summary, average_per_day, channel_frequency, summarize, summarize_top};
pub use error::HistoryError;
pub use export::export_records;
pub use index::HistoryIndex;
pub use ingest::{IngestReport, RejectionTally, ingest, ingest_payload};
pub use normalize::{Normalized, Rejection, RejectionReason, normalize};
pub use search::search;
