use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const YOUTUBE_ACCESS_TOKEN: &str = "youtube_access_token";
const YOUTUBE_REFRESH_TOKEN: &str = "youtube_refresh_token";
const YOUTUBE_TOKEN_EXPIRES: &str = "youtube_token_expires";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key/value token file
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;
            let creds_data: CredentialsData = toml::from_str(&content)
                .with_context(|| format!("Invalid credentials file {}", self.path.display()))?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write credentials to {}", self.path.display()))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn get_youtube_access_token(&self) -> Option<&String> {
        self.get(YOUTUBE_ACCESS_TOKEN)
    }

    pub fn set_youtube_access_token(&mut self, token: String) {
        self.set(YOUTUBE_ACCESS_TOKEN.to_string(), token);
    }

    pub fn get_youtube_refresh_token(&self) -> Option<&String> {
        self.get(YOUTUBE_REFRESH_TOKEN)
    }

    pub fn set_youtube_refresh_token(&mut self, token: String) {
        self.set(YOUTUBE_REFRESH_TOKEN.to_string(), token);
    }

    pub fn get_youtube_token_expires(&self) -> Option<DateTime<Utc>> {
        self.get(YOUTUBE_TOKEN_EXPIRES)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_youtube_token_expires(&mut self, expires: DateTime<Utc>) {
        self.set(YOUTUBE_TOKEN_EXPIRES.to_string(), expires.to_rfc3339());
    }

    /// Drop every stored YouTube token
    pub fn clear_youtube(&mut self) {
        self.remove(YOUTUBE_ACCESS_TOKEN);
        self.remove(YOUTUBE_REFRESH_TOKEN);
        self.remove(YOUTUBE_TOKEN_EXPIRES);
    }
}
