use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};
use yt_history_models::{SourceKind, WatchEvent};
use crate::error::HistoryError;
use crate::index::HistoryIndex;
use crate::normalize::{json_kind, normalize, RejectionReason};

/// Per-run count of rejected records, grouped by reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionTally {
    counts: BTreeMap<RejectionReason, usize>,
}

impl RejectionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: RejectionReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    /// Count for one reason (zero when the reason never occurred)
    pub fn count(&self, reason: RejectionReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Reasons in a stable order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (RejectionReason, usize)> + '_ {
        self.counts.iter().map(|(reason, count)| (*reason, *count))
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub events: Vec<WatchEvent>,
    pub tally: RejectionTally,
    pub total_seen: usize,
}

impl IngestReport {
    pub fn accepted(&self) -> usize {
        self.events.len()
    }

    pub fn rejected(&self) -> usize {
        self.tally.total()
    }

    pub fn into_index(self) -> HistoryIndex {
        HistoryIndex::new(self.events)
    }
}

/// Normalize a batch of raw records in a single pass.
///
/// Accepted events keep input order. A rejected record is tallied and
/// skipped; it never stops the batch.
pub fn ingest<'a, I>(records: I) -> IngestReport
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut report = IngestReport::default();

    for (position, raw) in records.into_iter().enumerate() {
        report.total_seen += 1;
        match normalize(raw) {
            Ok(event) => report.events.push(event),
            Err(rejection) => {
                debug!(
                    position = position,
                    reason = %rejection.reason,
                    detail = %rejection.detail,
                    "Rejected raw record"
                );
                report.tally.record(rejection.reason);
            }
        }
    }

    report
}

/// Ingest a whole payload from one input boundary.
///
/// Takeout payloads must be a top-level array. API payloads may be a bare
/// array of activity items or a list response with an `items` array.
pub fn ingest_payload(boundary: SourceKind, payload: &Value) -> Result<IngestReport, HistoryError> {
    let records = match (boundary, payload) {
        (_, Value::Array(items)) => items,
        (SourceKind::YouTubeApi, Value::Object(map)) => match map.get("items") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(HistoryError::MalformedInput {
                    boundary,
                    detail: format!("`items` must be an array, found {}", json_kind(other)),
                })
            }
            None => {
                return Err(HistoryError::MalformedInput {
                    boundary,
                    detail: "expected an activity list response with an `items` array".to_string(),
                })
            }
        },
        (_, other) => {
            return Err(HistoryError::MalformedInput {
                boundary,
                detail: format!("expected a JSON array of records, found {}", json_kind(other)),
            })
        }
    };

    let report = ingest(records);

    info!(
        source = %boundary,
        total = report.total_seen,
        accepted = report.accepted(),
        rejected = report.rejected(),
        "Ingested watch history"
    );
    for (reason, count) in report.tally.iter() {
        debug!(source = %boundary, reason = %reason, count = count, "Rejection tally");
    }

    Ok(report)
}
