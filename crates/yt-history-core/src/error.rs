use thiserror::Error;
use yt_history_models::SourceKind;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Date range or per-day figures were requested on a history with no timed events
    #[error("watch history is empty: no timed events to analyse")]
    EmptyHistory,

    /// The payload as a whole is not a record collection of the expected shape
    #[error("malformed {boundary} input: {detail}")]
    MalformedInput { boundary: SourceKind, detail: String },
}
