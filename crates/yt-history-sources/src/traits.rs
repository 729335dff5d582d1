use async_trait::async_trait;
use serde_json::Value;
use yt_history_models::SourceKind;

/// Upstream collaborator that produces a raw watch-history payload.
///
/// Sources only fetch; normalization happens in the core ingestor.
#[async_trait]
pub trait HistorySource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static + std::fmt::Display;

    fn source_name(&self) -> &str;

    /// Input boundary the payload belongs to
    fn kind(&self) -> SourceKind;

    // Authentication (no-op for file-backed sources)
    async fn authenticate(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn is_authenticated(&self) -> bool;

    /// Whole raw payload, unvalidated
    async fn fetch_payload(&self) -> Result<Value, Self::Error>;
}
