use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A raw record before normalization, tagged by the shape it was recognised as
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Takeout(TakeoutEntry),
    Activity(ActivityItem),
}

/// One entry of a Takeout `watch-history.json` array.
///
/// Every field is optional: Takeout omits `titleUrl` and `subtitles` for
/// removed videos and the normalizer decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TakeoutEntry {
    #[serde(default)]
    pub header: Option<String>, // "YouTube" or "YouTube Music"
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_subtitles")]
    pub subtitles: Option<Vec<Subtitle>>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<String>>,
}

impl TakeoutEntry {
    /// First subtitle carrying a non-empty channel name
    pub fn channel_subtitle(&self) -> Option<&Subtitle> {
        self.subtitles
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|s| s.name().map(|n| !n.trim().is_empty()).unwrap_or(false))
    }
}

/// Subtitle elements that fit neither form are dropped instead of failing the entry
fn lenient_subtitles<'de, D>(deserializer: D) -> Result<Option<Vec<Subtitle>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Element {
        Subtitle(Subtitle),
        Unrecognised(IgnoredAny),
    }

    let elements: Option<Vec<Element>> = Option::deserialize(deserializer)?;
    Ok(elements.map(|elements| {
        elements
            .into_iter()
            .filter_map(|element| match element {
                Element::Subtitle(subtitle) => Some(subtitle),
                Element::Unrecognised(_) => None,
            })
            .collect()
    }))
}

/// Channel attribution attached to a Takeout entry.
/// Older exports wrote bare strings instead of `{name, url}` objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Subtitle {
    Named {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    Plain(String),
}

impl Subtitle {
    pub fn name(&self) -> Option<&str> {
        match self {
            Subtitle::Named { name, .. } => name.as_deref(),
            Subtitle::Plain(name) => Some(name.as_str()),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Subtitle::Named { url, .. } => url.as_deref(),
            Subtitle::Plain(_) => None,
        }
    }
}

/// YouTube Data API v3 `activity` resource (`part=snippet,contentDetails`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(default)]
    pub id: Option<String>,
    pub snippet: ActivitySnippet,
    #[serde(default)]
    pub content_details: Option<ActivityContentDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnippet {
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContentDetails {
    #[serde(default)]
    pub upload: Option<VideoRef>,
    #[serde(default)]
    pub playlist_item: Option<ResourceRef>,
    #[serde(default)]
    pub recommendation: Option<ResourceRef>,
    #[serde(default)]
    pub like: Option<ResourceRef>,
}

impl ActivityContentDetails {
    /// Video ID from whichever detail block the activity type populated
    pub fn video_id(&self) -> Option<&str> {
        self.upload
            .as_ref()
            .and_then(|u| u.video_id.as_deref())
            .or_else(|| self.playlist_item.as_ref().and_then(ResourceRef::video_id))
            .or_else(|| self.recommendation.as_ref().and_then(ResourceRef::video_id))
            .or_else(|| self.like.as_ref().and_then(ResourceRef::video_id))
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoRef {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

impl ResourceRef {
    pub fn video_id(&self) -> Option<&str> {
        self.resource_id.as_ref().and_then(|r| r.video_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_takeout_entry_with_object_subtitles() {
        let entry: TakeoutEntry = serde_json::from_value(json!({
            "header": "YouTube",
            "title": "Watched Rust in 100 Seconds",
            "titleUrl": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
            "subtitles": [{
                "name": "Fireship",
                "url": "https://www.youtube.com/channel/UCsBjURrPoezykLs9EqgamOA"
            }],
            "time": "2023-04-02T17:11:09.123Z",
            "products": ["YouTube"]
        }))
        .unwrap();

        assert_eq!(entry.title_url.as_deref(), Some("https://www.youtube.com/watch?v=5C_HPTJg5ek"));
        let subtitle = entry.channel_subtitle().unwrap();
        assert_eq!(subtitle.name(), Some("Fireship"));
        assert_eq!(subtitle.url(), Some("https://www.youtube.com/channel/UCsBjURrPoezykLs9EqgamOA"));
    }

    #[test]
    fn test_takeout_entry_with_plain_subtitles() {
        let entry: TakeoutEntry = serde_json::from_value(json!({
            "title": "Watched Something",
            "subtitles": ["", "Old Channel"],
            "time": "2019-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(entry.channel_subtitle().and_then(Subtitle::name), Some("Old Channel"));
        assert_eq!(entry.channel_subtitle().and_then(Subtitle::url), None);
    }

    #[test]
    fn test_takeout_entry_skips_unrecognised_subtitles() {
        let entry: TakeoutEntry = serde_json::from_value(json!({
            "title": "Watched Something",
            "subtitles": [42, null, {"name": 7}, {"name": "Real Channel", "url": "https://www.youtube.com/channel/UC1"}],
            "time": "2019-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(entry.subtitles.as_ref().map(Vec::len), Some(1));
        assert_eq!(entry.channel_subtitle().and_then(Subtitle::name), Some("Real Channel"));

        let only_bad: TakeoutEntry =
            serde_json::from_value(json!({"title": "Watched Something", "subtitles": [42]})).unwrap();
        assert!(only_bad.channel_subtitle().is_none());

        let not_a_list = serde_json::from_value::<TakeoutEntry>(json!({"title": "T", "subtitles": "Channel"}));
        assert!(not_a_list.is_err());
    }

    #[test]
    fn test_takeout_entry_without_subtitles() {
        let entry: TakeoutEntry = serde_json::from_value(json!({
            "title": "Watched a video that has been removed",
            "time": "2019-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(entry.channel_subtitle().is_none());
    }

    #[test]
    fn test_activity_video_id_sources() {
        let upload: ActivityItem = serde_json::from_value(json!({
            "snippet": {"title": "Upload", "type": "upload"},
            "contentDetails": {"upload": {"videoId": "up123"}}
        }))
        .unwrap();
        assert_eq!(upload.content_details.unwrap().video_id(), Some("up123"));

        let playlist: ActivityItem = serde_json::from_value(json!({
            "snippet": {"title": "Added", "type": "playlistItem"},
            "contentDetails": {"playlistItem": {"resourceId": {"kind": "youtube#video", "videoId": "pl456"}}}
        }))
        .unwrap();
        assert_eq!(playlist.content_details.unwrap().video_id(), Some("pl456"));

        let subscription: ActivityItem = serde_json::from_value(json!({
            "snippet": {"title": "Some Channel", "type": "subscription"},
            "contentDetails": {"subscription": {"resourceId": {"kind": "youtube#channel", "channelId": "UC1"}}}
        }))
        .unwrap();
        assert_eq!(subscription.content_details.unwrap().video_id(), None);
    }
}
