use crate::error::SourceError;
use crate::traits::HistorySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};
use walkdir::WalkDir;
use yt_history_models::SourceKind;

/// File names Google Takeout uses for the YouTube watch history
const EXACT_NAMES: &[&str] = &["watch-history.json", "Watch History.json"];

fn history_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)watch.*history.*\.json$").expect("valid history file regex"))
}

/// Read and parse a Takeout watch-history file.
///
/// Only JSON syntax is checked here; the payload shape is validated by the
/// ingestor.
pub fn load_takeout_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Takeout file {}", path.display()))?;
    parse_takeout_json(&content, path)
}

fn parse_takeout_json(content: &str, path: &Path) -> Result<Value> {
    let payload: Value = serde_json::from_str(content)
        .with_context(|| format!("Takeout file {} is not valid JSON", path.display()))?;
    debug!(
        path = %path.display(),
        records = payload.as_array().map(|a| a.len()).unwrap_or(0),
        "Loaded Takeout file"
    );
    Ok(payload)
}

/// Rank 0 for the names Takeout writes, 1 for other `*watch*history*.json`
fn candidate_rank(name: &str) -> Option<u8> {
    if EXACT_NAMES.contains(&name) {
        Some(0)
    } else if history_name_re().is_match(name) {
        Some(1)
    } else {
        None
    }
}

/// Recursively find candidate watch-history files under `dir`.
///
/// Exact Takeout names come first, then looser matches; each group is
/// sorted by path. Unreadable entries are skipped.
pub fn find_takeout_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow::anyhow!("{} is not a directory", dir.display()));
    }

    let mut found: Vec<(u8, PathBuf)> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let rank = candidate_rank(entry.file_name().to_str()?)?;
            Some((rank, entry.into_path()))
        })
        .collect();

    found.sort();
    found.dedup_by(|a, b| a.1 == b.1);

    info!(dir = %dir.display(), count = found.len(), "Searched for Takeout files");
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// File-backed source for a Google Takeout export
pub struct TakeoutSource {
    path: PathBuf,
}

impl TakeoutSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistorySource for TakeoutSource {
    type Error = SourceError;

    fn source_name(&self) -> &str {
        "takeout"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Takeout
    }

    fn is_authenticated(&self) -> bool {
        true
    }

    async fn fetch_payload(&self) -> Result<Value, Self::Error> {
        let path = self.path();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read Takeout file {}", path.display()))?;
        Ok(parse_takeout_json(&content, path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_takeout_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watch-history.json");
        fs::write(
            &path,
            r#"[{"title": "Watched Intro", "titleUrl": "https://www.youtube.com/watch?v=abc123def45", "time": "2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let payload = load_takeout_file(&path).unwrap();
        assert_eq!(payload.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_load_takeout_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_takeout_file(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        let err = load_takeout_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("not valid JSON"));
    }

    #[test]
    fn test_load_takeout_file_keeps_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        assert!(load_takeout_file(&path).unwrap().is_object());
    }

    #[tokio::test]
    async fn test_takeout_source_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watch-history.json");
        fs::write(&path, "[]").unwrap();

        let source = TakeoutSource::new(path.clone());
        assert_eq!(source.path(), path.as_path());
        assert!(source.fetch_payload().await.unwrap().as_array().unwrap().is_empty());

        let missing = TakeoutSource::new(dir.path().join("gone.json"));
        let err = missing.fetch_payload().await.unwrap_err();
        assert!(err.to_string().contains("gone.json"));
    }

    #[test]
    fn test_find_takeout_files() {
        let dir = tempfile::tempdir().unwrap();
        let history_dir = dir.path().join("Takeout/YouTube and YouTube Music/history");
        fs::create_dir_all(&history_dir).unwrap();
        fs::write(history_dir.join("watch-history.json"), "[]").unwrap();
        fs::write(dir.path().join("my_watch_history_backup.json"), "[]").unwrap();
        fs::write(dir.path().join("Watch History.json"), "[]").unwrap();
        fs::write(dir.path().join("search-history.json"), "[]").unwrap();
        fs::write(dir.path().join("watch-history.html"), "").unwrap();

        let found = find_takeout_files(dir.path()).unwrap();

        assert_eq!(found.len(), 3);
        assert_eq!(found[0], dir.path().join("Takeout/YouTube and YouTube Music/history/watch-history.json"));
        assert_eq!(found[1], dir.path().join("Watch History.json"));
        assert_eq!(found[2], dir.path().join("my_watch_history_backup.json"));
    }

    #[test]
    fn test_find_takeout_files_empty_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_takeout_files(dir.path()).unwrap().is_empty());
        assert!(find_takeout_files(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_candidate_rank() {
        assert_eq!(candidate_rank("watch-history.json"), Some(0));
        assert_eq!(candidate_rank("WATCH_HISTORY.JSON"), Some(1));
        assert_eq!(candidate_rank("history.json"), None);
        assert_eq!(candidate_rank("watch-history.json.bak"), None);
    }
}
