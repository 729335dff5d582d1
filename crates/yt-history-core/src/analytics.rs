use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use crate::error::HistoryError;
use crate::index::HistoryIndex;

/// Channel rows shown by default
pub const DEFAULT_TOP_CHANNELS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelCount {
    pub name: String,
    pub count: usize,
    /// Share of *all* watched videos, removed ones included, so the column
    /// sums below 100 whenever some events have no channel.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl DateRange {
    /// Whole days between earliest and latest, never less than one
    pub fn span_days(&self) -> i64 {
        (self.latest - self.earliest).num_days().max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_videos: usize,
    pub removed_videos: usize,
    pub unique_channels: usize,
    /// `None` when the history has no timed events
    pub date_range: Option<DateRange>,
    pub span_days: Option<i64>,
    /// `None` rather than a division by zero on an empty history
    pub average_per_day: Option<f64>,
    pub top_channels: Vec<ChannelCount>,
}

pub fn summarize(index: &HistoryIndex) -> Summary {
    summarize_top(index, DEFAULT_TOP_CHANNELS)
}

pub fn summarize_top(index: &HistoryIndex, top_n: usize) -> Summary {
    let total_videos = index.count();
    let removed_videos = index.iter().filter(|e| e.removed).count();

    let date_range = index
        .date_range()
        .ok()
        .map(|(earliest, latest)| DateRange { earliest, latest });
    let span_days = date_range.map(|range| range.span_days());
    let average_per_day = span_days.map(|days| total_videos as f64 / days as f64);

    let ranking = channel_frequency(index);
    let unique_channels = ranking.len();
    let top_channels = ranking.into_iter().take(top_n).collect();

    Summary {
        total_videos,
        removed_videos,
        unique_channels,
        date_range,
        span_days,
        average_per_day,
        top_channels,
    }
}

/// Average videos per day, or `EmptyHistory` when there is nothing timed
pub fn average_per_day(index: &HistoryIndex) -> Result<f64, HistoryError> {
    let (earliest, latest) = index.date_range()?;
    let days = DateRange { earliest, latest }.span_days();
    Ok(index.count() as f64 / days as f64)
}

/// Full channel ranking: count descending, then name ascending.
/// Events without a channel name are left out of the grouping but still
/// count in the percentage denominator.
pub fn channel_frequency(index: &HistoryIndex) -> Vec<ChannelCount> {
    let total = index.count();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in index.iter() {
        if let Some(channel) = event.channel_name.as_deref() {
            *counts.entry(channel).or_insert(0) += 1;
        }
    }

    let mut ranking: Vec<ChannelCount> = counts
        .into_iter()
        .map(|(name, count)| ChannelCount {
            name: name.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranking
}
