use super::load::load_config;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use std::path::PathBuf;
use yt_history_config::PathManager;
use yt_history_sources::find_takeout_files;

pub fn run_find_takeout(dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => load_config(&PathManager::default())?.takeout.search_dir,
    };

    let found = find_takeout_files(&dir).map_err(|e| eyre!("{:#}", e))?;

    if !output.is_human() {
        output.json(&json!({
            "directory": dir.display().to_string(),
            "files": found.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    if found.is_empty() {
        output.warn(format!("No Takeout watch-history files found under {}", dir.display()));
        output.info("Request a Google Takeout export of 'YouTube and YouTube Music' history in JSON format.");
        return Ok(());
    }

    output.success(format!("Found {} candidate file(s) under {}:", found.len(), dir.display()));
    for path in &found {
        output.println(format!("  {}", path.display()));
    }
    if found.len() > 1 {
        output.info(format!("The first one is used by default: {}", found[0].display()));
    }
    Ok(())
}
