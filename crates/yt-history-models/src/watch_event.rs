use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::source_kind::SourceKind;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const WATCHED_PREFIX: &str = "Watched ";

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

/// One watched-video occurrence, normalized from either source shape.
///
/// Rewatches of the same video are separate events; `video_id` is not a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEvent {
    pub video_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub watched_at: DateTime<Utc>,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>, // Only API activity items carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>, // Raw API activity type (upload, playlistItem, ...)
    pub source: SourceKind,
    /// Removed, private or otherwise unavailable video.
    /// Counted in totals but never attributed to a channel.
    #[serde(default)]
    pub removed: bool,
}

impl WatchEvent {
    /// `YYYY-MM-DD HH:MM` label used in listings
    pub fn watched_label(&self) -> String {
        self.watched_at.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Title without the Takeout "Watched " verb, for listings.
    /// Removed-video sentinels keep it since the rest is not a title.
    pub fn display_title(&self) -> &str {
        if self.removed && self.video_id.is_none() {
            return &self.title;
        }
        match self.title.strip_prefix(WATCHED_PREFIX).map(str::trim) {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => &self.title,
        }
    }

    pub fn channel_or_unknown(&self) -> &str {
        self.channel_name.as_deref().unwrap_or("Unknown Channel")
    }
}
