use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a batch of raw records came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Google Takeout `watch-history.json` export
    Takeout,
    /// YouTube Data API v3 `activities` resources
    YouTubeApi,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Takeout => "takeout",
            SourceKind::YouTubeApi => "youtube-api",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
