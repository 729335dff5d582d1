use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub takeout: TakeoutConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// YouTube Data API fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Google OAuth client secrets JSON (`installed` or `web` app)
    #[serde(default)]
    pub client_secrets_file: Option<PathBuf>,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_redirect_port")]
    pub redirect_port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoutConfig {
    /// Explicit watch-history file; wins over discovery
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file")]
    pub default_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_top_channels")]
    pub top_channels: usize,
}

fn default_max_results() -> u32 {
    50
}

fn default_redirect_port() -> u16 {
    8080
}

fn default_search_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_file() -> PathBuf {
    PathBuf::from("watch_history.json")
}

fn default_top_channels() -> usize {
    10
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            client_secrets_file: None,
            max_results: default_max_results(),
            redirect_port: default_redirect_port(),
        }
    }
}

impl Default for TakeoutConfig {
    fn default() -> Self {
        Self {
            file: None,
            search_dir: default_search_dir(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_file: default_export_file(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_channels: default_top_channels(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Missing file means defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.youtube.max_results == 0 {
            return Err(anyhow::anyhow!("youtube.max_results must be at least 1"));
        }
        if self.analytics.top_channels == 0 {
            return Err(anyhow::anyhow!("analytics.top_channels must be at least 1"));
        }
        if self.youtube.enabled && self.youtube.client_secrets_file.is_none() {
            return Err(anyhow::anyhow!(
                "YouTube is enabled but client_secrets_file is not configured"
            ));
        }
        Ok(())
    }

    pub fn is_youtube_configured(&self) -> bool {
        self.youtube.enabled && self.youtube.client_secrets_file.is_some()
    }
}
