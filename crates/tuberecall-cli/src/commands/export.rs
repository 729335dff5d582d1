use super::load::load_history;
use crate::output::Output;
use crate::SourceArgs;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;
use yt_history_core::{export_records, search};
use yt_history_models::WatchEvent;

/// Write events as a pretty JSON array of export records; returns the count
pub fn write_export<'a, I>(path: &Path, events: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a WatchEvent>,
{
    let records = export_records(events);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "Exported watch history");
    Ok(records.len())
}

pub async fn run_export(
    source: &SourceArgs,
    query: Option<String>,
    file: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let (config, index) = load_history(source, output).await?.into_index();
    let path = file.unwrap_or_else(|| config.export.default_file.clone());

    let count = match query.as_deref() {
        Some(query) => write_export(&path, search(&index, query))?,
        None => write_export(&path, &index)?,
    };

    if count == 0 {
        output.warn(format!("Nothing matched; wrote an empty list to {}", path.display()));
    }

    if output.is_human() {
        output.success(format!("Exported {} items to {}", count, path.display()));
    } else {
        output.json(&json!({
            "success": true,
            "exported": count,
            "file": path.display().to_string(),
        }));
    }
    Ok(())
}

/// Export for the interactive menu, which has no source flags to reload
pub fn export_to(path: &Path, events: &[&WatchEvent], output: &Output) -> Result<()> {
    if events.is_empty() {
        return Err(eyre!("No events to export"));
    }
    let count = write_export(path, events.iter().copied())?;
    output.success(format!("Exported {} items to {}", count, path.display()));
    Ok(())
}
