use chrono::{DateTime, Utc};
use yt_history_models::WatchEvent;
use crate::error::HistoryError;

/// Immutable, ordered store of normalized watch events.
///
/// Construction is the only mutation point, so a shared `&HistoryIndex` can
/// be searched and summarized from several threads without locking.
#[derive(Debug, Clone, Default)]
pub struct HistoryIndex {
    events: Vec<WatchEvent>,
}

impl HistoryIndex {
    pub fn new(events: Vec<WatchEvent>) -> Self {
        Self { events }
    }

    /// Events in source order
    pub fn all(&self) -> &[WatchEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchEvent> {
        self.events.iter()
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events ordered by `watched_at`; equal timestamps keep source order
    /// in both directions.
    pub fn sorted_by_time(&self, ascending: bool) -> Vec<&WatchEvent> {
        let mut sorted: Vec<&WatchEvent> = self.events.iter().collect();
        if ascending {
            sorted.sort_by(|a, b| a.watched_at.cmp(&b.watched_at));
        } else {
            sorted.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        }
        sorted
    }

    /// Earliest and latest watch time
    pub fn date_range(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), HistoryError> {
        let earliest = self.events.iter().map(|e| e.watched_at).min();
        let latest = self.events.iter().map(|e| e.watched_at).max();
        match (earliest, latest) {
            (Some(earliest), Some(latest)) => Ok((earliest, latest)),
            _ => Err(HistoryError::EmptyHistory),
        }
    }
}

impl FromIterator<WatchEvent> for HistoryIndex {
    fn from_iter<T: IntoIterator<Item = WatchEvent>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HistoryIndex {
    type Item = &'a WatchEvent;
    type IntoIter = std::slice::Iter<'a, WatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
