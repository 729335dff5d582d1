use serde::{Deserialize, Serialize};
use crate::watch_event::WatchEvent;

/// Flat projection of a `WatchEvent` written by the export command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub video_id: Option<String>,
    pub title: String,
    pub channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub watched_at: String, // RFC 3339
    pub url: Option<String>,
}

impl From<&WatchEvent> for ExportRecord {
    fn from(event: &WatchEvent) -> Self {
        Self {
            video_id: event.video_id.clone(),
            title: event.title.clone(),
            channel_name: event.channel_name.clone(),
            channel_id: event.channel_id.clone(),
            watched_at: event.watched_at.to_rfc3339(),
            url: event.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_record_field_names() {
        let event = WatchEvent {
            video_id: Some("abc123def45".to_string()),
            title: "Cooking Basics".to_string(),
            channel_name: Some("Kitchen".to_string()),
            channel_id: Some("UCkitchen".to_string()),
            watched_at: Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap(),
            url: Some("https://www.youtube.com/watch?v=abc123def45".to_string()),
            description: Some("not exported".to_string()),
            activity_type: None,
            source: SourceKind::Takeout,
            removed: false,
        };

        let value = serde_json::to_value(ExportRecord::from(&event)).unwrap();
        assert_eq!(value["videoId"], "abc123def45");
        assert_eq!(value["channelName"], "Kitchen");
        assert_eq!(value["channelId"], "UCkitchen");
        assert_eq!(value["watchedAt"], "2022-06-01T12:00:00+00:00");
        assert!(value.get("description").is_none());
    }
}
