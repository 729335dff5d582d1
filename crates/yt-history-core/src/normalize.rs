use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;
use yt_history_models::{watch_url, ActivityItem, RawRecord, SourceKind, TakeoutEntry, WatchEvent};

/// Title given to identifiable records that arrive without one
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Takeout title verbs that record something other than a watch
const NON_WATCH_PREFIXES: [&str; 3] = ["Searched for ", "Visited ", "Subscribed to "];

/// API activity types that correspond to a video being viewed or engaged with
const WATCH_ACTIVITY_TYPES: [&str; 4] = ["upload", "playlistItem", "recommendation", "like"];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

// Legacy Takeout display form, e.g. "Dec 15, 2023, 3:45:23 PM PST"
const DISPLAY_FORMATS: [&str; 2] = ["%b %d, %Y, %I:%M:%S %p", "%b %d, %Y, %H:%M:%S"];

fn unavailable_title_re() -> &'static Regex {
    static UNAVAILABLE_RE: OnceLock<Regex> = OnceLock::new();
    UNAVAILABLE_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(watched\s+)?(a video that has been removed|(this video is )?no longer available|(private|deleted) video)$|^(watched\s+)?https?://",
        )
        .expect("valid unavailable title regex")
    })
}

fn zone_suffix_re() -> &'static Regex {
    static ZONE_RE: OnceLock<Regex> = OnceLock::new();
    ZONE_RE.get_or_init(|| Regex::new(r"\s+[A-Z]{3,4}$").expect("valid zone suffix regex"))
}

fn display_date_re() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| Regex::new(r"([A-Z][a-z]{2}\s+\d{1,2},\s+\d{4})").expect("valid display date regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Not an object, or a field carried the wrong JSON type
    Malformed,
    /// Neither a title nor a video ID
    Unidentifiable,
    /// Timestamp missing or unparsable
    BadTimestamp,
    /// Searches, subscriptions and other non-watch activity
    UnsupportedActivity,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Malformed => "malformed record",
            RejectionReason::Unidentifiable => "unidentifiable",
            RejectionReason::BadTimestamp => "bad timestamp",
            RejectionReason::UnsupportedActivity => "unsupported activity",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why one raw record could not become a `WatchEvent`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}: {detail}")]
pub struct Rejection {
    pub reason: RejectionReason,
    pub detail: String,
}

impl Rejection {
    pub fn new(reason: RejectionReason, detail: impl Into<String>) -> Self {
        Self { reason, detail: detail.into() }
    }
}

pub type Normalized = Result<WatchEvent, Rejection>;

/// Normalize one raw record of either shape.
///
/// The shape is decided from the fields present: an object with a `snippet`
/// object is an API activity, any other object is read as a Takeout entry.
pub fn normalize(raw: &Value) -> Normalized {
    let record = detect_shape(raw)?;
    normalize_record(&record)
}

pub fn detect_shape(raw: &Value) -> Result<RawRecord, Rejection> {
    let object = raw.as_object().ok_or_else(|| {
        Rejection::new(
            RejectionReason::Malformed,
            format!("expected a JSON object, found {}", json_kind(raw)),
        )
    })?;

    if object.get("snippet").map(Value::is_object).unwrap_or(false) {
        ActivityItem::deserialize(raw)
            .map(RawRecord::Activity)
            .map_err(|e| Rejection::new(RejectionReason::Malformed, format!("activity item: {}", e)))
    } else {
        TakeoutEntry::deserialize(raw)
            .map(RawRecord::Takeout)
            .map_err(|e| Rejection::new(RejectionReason::Malformed, format!("takeout entry: {}", e)))
    }
}

pub fn normalize_record(record: &RawRecord) -> Normalized {
    match record {
        RawRecord::Takeout(entry) => normalize_takeout(entry),
        RawRecord::Activity(item) => normalize_activity(item),
    }
}

fn normalize_takeout(entry: &TakeoutEntry) -> Normalized {
    let raw_title = non_empty(entry.title.as_deref()).unwrap_or("");
    let video_id = entry.title_url.as_deref().and_then(extract_video_id);

    if raw_title.is_empty() && video_id.is_none() {
        return Err(Rejection::new(
            RejectionReason::Unidentifiable,
            "takeout entry has neither a title nor a video URL",
        ));
    }

    let watched_at = parse_watch_time(entry.time.as_deref())?;

    if let Some(prefix) = NON_WATCH_PREFIXES.iter().find(|p| raw_title.starts_with(**p)) {
        return Err(Rejection::new(
            RejectionReason::UnsupportedActivity,
            format!("takeout entry records '{}' rather than a watch", prefix.trim()),
        ));
    }

    let removed = is_unavailable_title(raw_title) || video_id.is_none();
    // Kept as exported, "Watched " verb included
    let title = if raw_title.is_empty() { UNKNOWN_TITLE } else { entry.title.as_deref().unwrap_or(raw_title) };

    let (channel_name, channel_id) = if removed {
        (None, None)
    } else {
        let subtitle = entry.channel_subtitle();
        (
            subtitle.and_then(|s| non_empty(s.name())).map(str::to_string),
            subtitle.and_then(|s| s.url()).and_then(extract_channel_id),
        )
    };

    Ok(WatchEvent {
        url: video_id.as_deref().map(watch_url),
        video_id,
        title: title.to_string(),
        channel_name,
        channel_id,
        watched_at,
        description: None,
        activity_type: None,
        source: SourceKind::Takeout,
        removed,
    })
}

fn normalize_activity(item: &ActivityItem) -> Normalized {
    let snippet = &item.snippet;
    let raw_title = non_empty(snippet.title.as_deref()).unwrap_or("");
    let video_id = item
        .content_details
        .as_ref()
        .and_then(|d| d.video_id())
        .map(|id| id.trim().to_string());

    if raw_title.is_empty() && video_id.is_none() {
        return Err(Rejection::new(
            RejectionReason::Unidentifiable,
            "activity item has neither a title nor a video ID",
        ));
    }

    let watched_at = parse_watch_time(snippet.published_at.as_deref())?;

    let activity_type = non_empty(snippet.activity_type.as_deref());
    if let Some(kind) = activity_type {
        if !WATCH_ACTIVITY_TYPES.contains(&kind) {
            return Err(Rejection::new(
                RejectionReason::UnsupportedActivity,
                format!("activity type '{}' is not a video view", kind),
            ));
        }
    }

    let removed = is_unavailable_title(raw_title) || video_id.is_none();
    let title = if raw_title.is_empty() { UNKNOWN_TITLE } else { raw_title };

    let (channel_name, channel_id) = if removed {
        (None, None)
    } else {
        (
            non_empty(snippet.channel_title.as_deref()).map(str::to_string),
            non_empty(snippet.channel_id.as_deref()).map(str::to_string),
        )
    };

    Ok(WatchEvent {
        url: video_id.as_deref().map(watch_url),
        video_id,
        title: title.to_string(),
        channel_name,
        channel_id,
        watched_at,
        description: non_empty(snippet.description.as_deref()).map(str::to_string),
        activity_type: activity_type.map(str::to_string),
        source: SourceKind::YouTubeApi,
        removed,
    })
}

fn parse_watch_time(raw: Option<&str>) -> Result<DateTime<Utc>, Rejection> {
    let raw = non_empty(raw)
        .ok_or_else(|| Rejection::new(RejectionReason::BadTimestamp, "missing timestamp"))?;
    parse_timestamp(raw).ok_or_else(|| {
        Rejection::new(RejectionReason::BadTimestamp, format!("unparsable timestamp '{}'", raw))
    })
}

/// Parse a watch timestamp into UTC.
///
/// RFC 3339 is what current exports and the API emit. Naive forms and the
/// legacy Takeout display form carry no usable offset and are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let cleaned = raw.trim().replace(['\u{202f}', '\u{a0}'], " ");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(naive.and_utc());
        }
    }

    let without_zone = zone_suffix_re().replace(&cleaned, "");
    for candidate in [cleaned.as_str(), &*without_zone] {
        for fmt in DISPLAY_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(candidate, fmt) {
                return Some(naive.and_utc());
            }
        }
    }

    display_date_re()
        .captures(&cleaned)
        .and_then(|caps| NaiveDate::parse_from_str(&caps[1], "%b %d, %Y").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Extract a video ID from any of the URL shapes YouTube uses
pub fn extract_video_id(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let candidate = if host == "youtu.be" {
        segments.first().map(|s| s.to_string())
    } else if is_youtube_host(&host) {
        match segments.as_slice() {
            ["watch", ..] => parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            ["shorts" | "embed" | "v" | "live", id, ..] => Some(id.to_string()),
            _ => None,
        }
    } else {
        None
    };

    candidate.filter(|id| is_valid_video_id(id))
}

/// Extract a channel ID from a `youtube.com/channel/<id>` URL
pub fn extract_channel_id(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    if !is_youtube_host(&host) {
        return None;
    }
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("channel"), Some(id)) => Some(id.to_string()),
        _ => None,
    }
}

/// Sentinel titles Takeout and the API use for removed or private videos
pub fn is_unavailable_title(title: &str) -> bool {
    unavailable_title_re().is_match(title.trim())
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtube-nocookie.com" || host.ends_with(".youtube-nocookie.com")
}

fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn takeout_entry(title: &str, video_id: &str, channel: &str, time: &str) -> Value {
        json!({
            "header": "YouTube",
            "title": title,
            "titleUrl": format!("https://www.youtube.com/watch?v={}", video_id),
            "subtitles": [{
                "name": channel,
                "url": "https://www.youtube.com/channel/UC8butISFwT-Wl7EV0hUK0BQ"
            }],
            "time": time,
            "products": ["YouTube"],
            "activityControls": ["YouTube watch history"]
        })
    }

    fn activity_item(activity_type: &str, video_id: Option<&str>) -> Value {
        let content_details = match video_id {
            Some(id) => json!({"upload": {"videoId": id}}),
            None => json!({}),
        };
        json!({
            "kind": "youtube#activity",
            "id": "MTUxNTc3NzE2",
            "snippet": {
                "publishedAt": "2024-02-10T08:30:00Z",
                "channelId": "UCW5YeuERMmlnqo4oq8vwUpg",
                "title": "Python Tutorial for Beginners",
                "description": "Learn Python from scratch",
                "channelTitle": "Net Ninja",
                "type": activity_type
            },
            "contentDetails": content_details
        })
    }

    #[test]
    fn test_normalize_takeout_entry() {
        let raw = takeout_entry(
            "Watched Rust in 100 Seconds",
            "5C_HPTJg5ek",
            "Fireship",
            "2023-04-02T17:11:09.123Z",
        );
        let event = normalize(&raw).unwrap();

        assert_eq!(event.title, "Watched Rust in 100 Seconds");
        assert_eq!(event.video_id.as_deref(), Some("5C_HPTJg5ek"));
        assert_eq!(event.url.as_deref(), Some("https://www.youtube.com/watch?v=5C_HPTJg5ek"));
        assert_eq!(event.channel_name.as_deref(), Some("Fireship"));
        assert_eq!(event.channel_id.as_deref(), Some("UC8butISFwT-Wl7EV0hUK0BQ"));
        assert_eq!(event.source, SourceKind::Takeout);
        assert!(!event.removed);
        assert_eq!(
            event.watched_at,
            DateTime::parse_from_rfc3339("2023-04-02T17:11:09.123Z").unwrap().with_timezone(&Utc)
        );
    }

    #[test]
    fn test_normalize_takeout_keeps_title_without_prefix() {
        let raw = takeout_entry("Python Tutorial for Beginners", "rfscVS0vtbw", "freeCodeCamp", "2021-05-01T10:00:00Z");
        let event = normalize(&raw).unwrap();
        assert_eq!(event.title, "Python Tutorial for Beginners");
        assert_eq!(event.watched_at, Utc.with_ymd_and_hms(2021, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_normalize_takeout_title_and_time_round_trip() {
        for (title, time) in [
            ("Watched Rust in 100 Seconds", "2023-04-02T17:11:09.123Z"),
            ("Watched  Watched Twice Over", "2022-12-31T23:59:59Z"),
            ("Watched ", "2020-06-01T12:00:00+02:00"),
        ] {
            let event = normalize(&takeout_entry(title, "5C_HPTJg5ek", "Fireship", time)).unwrap();
            assert_eq!(event.title, title);
            assert_eq!(event.watched_at, DateTime::parse_from_rfc3339(time).unwrap().with_timezone(&Utc));
        }
    }

    #[test]
    fn test_normalize_title_mentioning_sentinel_keeps_channel() {
        let raw = json!({
            "title": "Watched Why this game is no longer available",
            "titleUrl": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
            "subtitles": [{"name": "GameChannel"}],
            "time": "2023-04-02T17:11:09Z"
        });
        let event = normalize(&raw).unwrap();
        assert!(!event.removed);
        assert_eq!(event.channel_name.as_deref(), Some("GameChannel"));
        assert_eq!(event.title, "Watched Why this game is no longer available");
    }

    #[test]
    fn test_normalize_ignores_unrecognised_subtitle() {
        let raw = json!({
            "title": "Watched Rust in 100 Seconds",
            "titleUrl": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
            "subtitles": [42, {"name": "Fireship"}],
            "time": "2023-04-02T17:11:09Z"
        });
        let event = normalize(&raw).unwrap();
        assert_eq!(event.channel_name.as_deref(), Some("Fireship"));

        let bare = json!({
            "title": "Watched Rust in 100 Seconds",
            "titleUrl": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
            "subtitles": [42],
            "time": "2023-04-02T17:11:09Z"
        });
        let event = normalize(&bare).unwrap();
        assert!(!event.removed);
        assert_eq!(event.channel_name, None);
    }

    #[test]
    fn test_normalize_removed_video() {
        let raw = json!({
            "header": "YouTube",
            "title": "Watched a video that has been removed",
            "time": "2020-11-03T21:14:55.000Z",
            "products": ["YouTube"]
        });
        let event = normalize(&raw).unwrap();

        assert!(event.removed);
        assert_eq!(event.title, "Watched a video that has been removed");
        assert_eq!(event.video_id, None);
        assert_eq!(event.url, None);
        assert_eq!(event.channel_name, None);
    }

    #[test]
    fn test_normalize_url_without_video_id_is_removed() {
        let raw = json!({
            "title": "Watched Some Old Clip",
            "titleUrl": "https://www.youtube.com/attribution_link?a=xyz",
            "subtitles": [{"name": "Someone"}],
            "time": "2015-01-01T00:00:00Z"
        });
        let event = normalize(&raw).unwrap();
        assert!(event.removed);
        assert_eq!(event.channel_name, None);
        assert_eq!(event.title, "Watched Some Old Clip");
    }

    #[test]
    fn test_normalize_url_titled_entry_is_removed() {
        let raw = takeout_entry(
            "Watched https://www.youtube.com/watch?v=AAAAAAAAAAA",
            "AAAAAAAAAAA",
            "Ghost",
            "2016-01-01T00:00:00Z",
        );
        let event = normalize(&raw).unwrap();
        assert!(event.removed);
        assert_eq!(event.video_id.as_deref(), Some("AAAAAAAAAAA"));
        assert_eq!(event.channel_name, None);
    }

    #[test]
    fn test_normalize_unidentifiable() {
        let raw = json!({"time": "2020-01-01T00:00:00Z", "subtitles": [{"name": "Channel"}]});
        let rejection = normalize(&raw).unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::Unidentifiable);

        let blank = json!({"title": "   ", "time": "2020-01-01T00:00:00Z"});
        assert_eq!(normalize(&blank).unwrap_err().reason, RejectionReason::Unidentifiable);

        assert_eq!(normalize(&json!({})).unwrap_err().reason, RejectionReason::Unidentifiable);
    }

    #[test]
    fn test_normalize_unidentifiable_wins_over_bad_timestamp() {
        let raw = json!({"title": "", "time": "not a date"});
        assert_eq!(normalize(&raw).unwrap_err().reason, RejectionReason::Unidentifiable);
    }

    #[test]
    fn test_normalize_missing_timestamp() {
        let raw = json!({
            "title": "Watched Cooking Basics",
            "titleUrl": "https://www.youtube.com/watch?v=abc123def45"
        });
        let rejection = normalize(&raw).unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::BadTimestamp);
        assert_eq!(rejection.detail, "missing timestamp");
    }

    #[test]
    fn test_normalize_unparsable_timestamp() {
        let raw = takeout_entry("Watched Cooking Basics", "abc123def45", "Kitchen", "yesterday-ish");
        let rejection = normalize(&raw).unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::BadTimestamp);
        assert!(rejection.detail.contains("yesterday-ish"));
    }

    #[test]
    fn test_normalize_empty_title_with_video_id() {
        let raw = json!({
            "titleUrl": "https://youtu.be/abc123def45",
            "time": "2020-01-01T00:00:00Z"
        });
        let event = normalize(&raw).unwrap();
        assert_eq!(event.title, UNKNOWN_TITLE);
        assert_eq!(event.video_id.as_deref(), Some("abc123def45"));
    }

    #[test]
    fn test_normalize_search_entry_is_unsupported() {
        let raw = json!({
            "title": "Searched for rust lifetimes",
            "titleUrl": "https://www.youtube.com/results?search_query=rust+lifetimes",
            "time": "2022-01-01T00:00:00Z"
        });
        assert_eq!(normalize(&raw).unwrap_err().reason, RejectionReason::UnsupportedActivity);
    }

    #[test]
    fn test_normalize_malformed_shapes() {
        assert_eq!(normalize(&json!("just a string")).unwrap_err().reason, RejectionReason::Malformed);
        assert_eq!(normalize(&json!(42)).unwrap_err().reason, RejectionReason::Malformed);
        assert_eq!(normalize(&Value::Null).unwrap_err().reason, RejectionReason::Malformed);

        let wrong_type = json!({"title": 12, "time": "2020-01-01T00:00:00Z"});
        assert_eq!(normalize(&wrong_type).unwrap_err().reason, RejectionReason::Malformed);
    }

    #[test]
    fn test_normalize_activity_item() {
        let event = normalize(&activity_item("upload", Some("rfscVS0vtbw"))).unwrap();

        assert_eq!(event.source, SourceKind::YouTubeApi);
        assert_eq!(event.title, "Python Tutorial for Beginners");
        assert_eq!(event.channel_name.as_deref(), Some("Net Ninja"));
        assert_eq!(event.channel_id.as_deref(), Some("UCW5YeuERMmlnqo4oq8vwUpg"));
        assert_eq!(event.description.as_deref(), Some("Learn Python from scratch"));
        assert_eq!(event.activity_type.as_deref(), Some("upload"));
        assert_eq!(event.url.as_deref(), Some("https://www.youtube.com/watch?v=rfscVS0vtbw"));
        assert_eq!(event.watched_at, Utc.with_ymd_and_hms(2024, 2, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_normalize_activity_without_video_is_removed() {
        let event = normalize(&activity_item("recommendation", None)).unwrap();
        assert!(event.removed);
        assert_eq!(event.channel_name, None);
        assert_eq!(event.url, None);
    }

    #[test]
    fn test_normalize_activity_unsupported_type() {
        let rejection = normalize(&activity_item("subscription", None)).unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::UnsupportedActivity);
        assert!(rejection.detail.contains("subscription"));
    }

    #[test]
    fn test_shape_detection() {
        assert!(matches!(detect_shape(&activity_item("like", Some("x1"))), Ok(RawRecord::Activity(_))));
        assert!(matches!(
            detect_shape(&takeout_entry("Watched X", "abc", "C", "2020-01-01T00:00:00Z")),
            Ok(RawRecord::Takeout(_))
        ));
        // A non-object snippet does not make an API item
        assert!(matches!(detect_shape(&json!({"snippet": "x", "title": "T"})), Ok(RawRecord::Takeout(_))));
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/abcDEF12345").as_deref(), Some("abcDEF12345"));
        assert_eq!(extract_video_id("https://www.youtube.com/embed/abcDEF12345").as_deref(), Some("abcDEF12345"));
        assert_eq!(extract_video_id("https://music.youtube.com/watch?v=abcDEF12345").as_deref(), Some("abcDEF12345"));
        assert_eq!(extract_video_id("https://www.youtube.com/results?search_query=rust"), None);
        assert_eq!(extract_video_id("https://vimeo.com/watch?v=abc"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn test_extract_channel_id() {
        assert_eq!(
            extract_channel_id("https://www.youtube.com/channel/UCsBjURrPoezykLs9EqgamOA").as_deref(),
            Some("UCsBjURrPoezykLs9EqgamOA")
        );
        assert_eq!(extract_channel_id("https://www.youtube.com/@fireship"), None);
        assert_eq!(extract_channel_id("https://example.com/channel/UC1"), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 12, 15, 15, 45, 23).unwrap();
        assert_eq!(parse_timestamp("2023-12-15T15:45:23Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-12-15T16:45:23+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-12-15T15:45:23"), Some(expected));
        assert_eq!(parse_timestamp("2023-12-15 15:45:23"), Some(expected));
        assert_eq!(parse_timestamp("Dec 15, 2023, 3:45:23 PM PST"), Some(expected));
        assert_eq!(parse_timestamp("Dec 15, 2023, 3:45:23\u{202f}PM EST"), Some(expected));
        assert_eq!(parse_timestamp("Dec 15, 2023, 15:45:23"), Some(expected));
        assert_eq!(
            parse_timestamp("on Dec 15, 2023 sometime"),
            Some(Utc.with_ymd_and_hms(2023, 12, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2023-13-45T99:00:00Z"), None);
    }

    #[test]
    fn test_is_unavailable_title() {
        assert!(is_unavailable_title("Watched a video that has been removed"));
        assert!(is_unavailable_title("Private video"));
        assert!(is_unavailable_title("Deleted video"));
        assert!(is_unavailable_title("Watched https://www.youtube.com/watch?v=abc"));
        assert!(is_unavailable_title("This video is no longer available"));
        assert!(is_unavailable_title("Watched no longer available"));
        assert!(!is_unavailable_title("Watched My Private Video Diary"));
        assert!(!is_unavailable_title("Watched Why this game is no longer available"));
        assert!(!is_unavailable_title("Watched The video that has been removed from Netflix"));
        assert!(!is_unavailable_title("Python Tutorial for Beginners"));
    }

    #[test]
    fn test_normalize_is_pure() {
        let raw = takeout_entry("Watched Rust in 100 Seconds", "5C_HPTJg5ek", "Fireship", "2023-04-02T17:11:09Z");
        assert_eq!(normalize(&raw), normalize(&raw));
    }
}
