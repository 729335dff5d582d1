use super::fetch_ui::FetchSpinner;
use crate::output::Output;
use crate::SourceArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;
use yt_history_config::{Config, PathManager};
use yt_history_core::{ingest_payload, HistoryIndex, IngestReport};
use yt_history_models::SourceKind;
use yt_history_sources::{find_takeout_files, HistorySource, TakeoutSource, YouTubeClient};

/// Where this run reads its history from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOrigin {
    TakeoutFile(PathBuf),
    YouTubeApi,
}

impl fmt::Display for HistoryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryOrigin::TakeoutFile(path) => write!(f, "Takeout file {}", path.display()),
            HistoryOrigin::YouTubeApi => write!(f, "YouTube Data API"),
        }
    }
}

pub struct LoadedHistory {
    pub config: Config,
    pub origin: HistoryOrigin,
    pub report: IngestReport,
}

impl LoadedHistory {
    pub fn into_index(self) -> (Config, HistoryIndex) {
        (self.config, self.report.into_index())
    }
}

pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Pick the history source: `--api`, then `--takeout`, then the configured
/// Takeout file, then the first discovered Takeout file, then the API when
/// it is configured.
pub fn select_source(args: &SourceArgs, config: &Config) -> Result<HistoryOrigin> {
    if args.api {
        if !config.is_youtube_configured() {
            return Err(eyre!(
                "The YouTube API is not configured. Run 'tuberecall config youtube --client-secrets <file>' first."
            ));
        }
        return Ok(HistoryOrigin::YouTubeApi);
    }

    if let Some(path) = &args.takeout {
        return Ok(HistoryOrigin::TakeoutFile(path.clone()));
    }

    if let Some(path) = &config.takeout.file {
        return Ok(HistoryOrigin::TakeoutFile(path.clone()));
    }

    match find_takeout_files(&config.takeout.search_dir) {
        Ok(found) => {
            if let Some(first) = found.into_iter().next() {
                return Ok(HistoryOrigin::TakeoutFile(first));
            }
        }
        Err(e) => debug!("Takeout discovery skipped: {:#}", e),
    }

    if config.is_youtube_configured() {
        return Ok(HistoryOrigin::YouTubeApi);
    }

    Err(eyre!(
        "No watch history found. Pass --takeout <file>, set one with 'tuberecall config takeout --file <file>', \
         or set up the API fallback with 'tuberecall config youtube'."
    ))
}

async fn fetch_from<S: HistorySource>(source: &mut S, output: &Output) -> Result<(SourceKind, Value)> {
    if !source.is_authenticated() {
        source
            .authenticate()
            .await
            .map_err(|e| eyre!("Failed to authenticate with {}: {}", source.source_name(), e))?;
    }

    let spinner = FetchSpinner::start(
        format!("Loading watch history from {}...", source.source_name()),
        output.is_human() && !output.is_quiet(),
    );
    let payload = source
        .fetch_payload()
        .await
        .map_err(|e| eyre!("Failed to load watch history from {}: {}", source.source_name(), e))?;
    spinner.finish();

    Ok((source.kind(), payload))
}

/// Resolve the source, fetch its payload and run it through the ingestor
pub async fn load_history(args: &SourceArgs, output: &Output) -> Result<LoadedHistory> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let origin = select_source(args, &config)?;
    debug!(origin = %origin, "Selected history source");

    let (kind, payload) = match &origin {
        HistoryOrigin::TakeoutFile(path) => {
            let mut source = TakeoutSource::new(path.clone());
            fetch_from(&mut source, output).await?
        }
        HistoryOrigin::YouTubeApi => {
            let mut client = YouTubeClient::from_config(&config.youtube, path_manager.credentials_file())
                .map_err(|e| eyre!("Failed to set up the YouTube client: {:#}", e))?;
            output.warn("The YouTube API only exposes recent channel activity, not the full watch history.");
            fetch_from(&mut client, output).await?
        }
    };

    let report = ingest_payload(kind, &payload)?;

    if report.rejected() > 0 {
        let reasons: Vec<String> = report
            .tally
            .iter()
            .map(|(reason, count)| format!("{} {}", count, reason))
            .collect();
        output.warn(format!(
            "Skipped {} of {} records ({})",
            report.rejected(),
            report.total_seen,
            reasons.join(", ")
        ));
    }
    output.info(format!("Loaded {} watched videos from {}", report.accepted(), origin));

    Ok(LoadedHistory { config, origin, report })
}
