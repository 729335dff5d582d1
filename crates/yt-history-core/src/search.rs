use yt_history_models::WatchEvent;
use crate::index::HistoryIndex;

/// Case-insensitive substring search over title, channel name and description.
///
/// The query is trimmed first and an empty query matches every event.
/// Results keep the index's source order.
pub fn search<'a>(index: &'a HistoryIndex, query: &str) -> Vec<&'a WatchEvent> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return index.iter().collect();
    }
    index.iter().filter(|event| matches(event, &needle)).collect()
}

fn matches(event: &WatchEvent, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.map(|value| value.to_lowercase().contains(needle)).unwrap_or(false)
    };
    contains(Some(event.title.as_str())) || contains(event.channel_name.as_deref()) || contains(event.description.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use yt_history_models::SourceKind;

    fn event(title: &str, channel: Option<&str>, description: Option<&str>) -> WatchEvent {
        WatchEvent {
            video_id: Some("abc123def45".to_string()),
            title: title.to_string(),
            channel_name: channel.map(str::to_string),
            channel_id: None,
            watched_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            url: None,
            description: description.map(str::to_string),
            activity_type: None,
            source: SourceKind::Takeout,
            removed: false,
        }
    }

    fn sample_index() -> HistoryIndex {
        HistoryIndex::new(vec![
            event("Python Tutorial for Beginners", Some("freeCodeCamp"), None),
            event("Cooking Basics", Some("Kitchen Stories"), None),
            event("Lo-fi beats", None, Some("Music for studying and coding tutorials")),
            event("Rust Crash Course", Some("Traversy TUTORIALS"), None),
        ])
    }

    fn titles<'a>(events: &[&'a WatchEvent]) -> Vec<&'a str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_search_title_case_insensitive() {
        let index = sample_index();
        let results = search(&index, "tutorial");
        assert!(titles(&results).contains(&"Python Tutorial for Beginners"));
        assert!(!titles(&results).contains(&"Cooking Basics"));
    }

    #[test]
    fn test_search_channel_and_description() {
        let index = sample_index();
        assert_eq!(titles(&search(&index, "KITCHEN")), vec!["Cooking Basics"]);
        assert_eq!(
            titles(&search(&index, "tutorial")),
            vec!["Python Tutorial for Beginners", "Lo-fi beats", "Rust Crash Course"]
        );
    }

    #[test]
    fn test_search_empty_query_returns_everything() {
        let index = sample_index();
        assert_eq!(search(&index, "").len(), 4);
        assert_eq!(search(&index, "   ").len(), 4);
    }

    #[test]
    fn test_search_no_match() {
        let index = sample_index();
        assert!(search(&index, "quantum chromodynamics").is_empty());
    }

    #[test]
    fn test_search_is_repeatable() {
        let index = sample_index();
        assert_eq!(search(&index, "rust"), search(&index, "rust"));
        assert_eq!(index.count(), 4);
    }
}
