use super::export::write_export;
use super::load::load_history;
use crate::output::Output;
use crate::SourceArgs;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use yt_history_core::{export_records, search};
use yt_history_models::WatchEvent;

pub async fn run_search(
    query: &str,
    source: &SourceArgs,
    limit: usize,
    export: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let (_config, index) = load_history(source, output).await?.into_index();
    let matches = search(&index, query);

    if output.is_human() {
        print_matches(query, &matches, limit, output);
    } else {
        output.json(&json!({
            "query": query,
            "total_matches": matches.len(),
            "results": serde_json::to_value(export_records(matches.iter().copied().take(limit)))?,
        }));
    }

    if let Some(path) = export {
        let count = write_export(&path, matches.iter().copied())?;
        output.success(format!("Exported {} matches to {}", count, path.display()));
    }
    Ok(())
}

/// Human rendering shared with the interactive menu
pub fn print_matches(query: &str, matches: &[&WatchEvent], limit: usize, output: &Output) {
    if matches.is_empty() {
        output.warn(format!("No videos found matching '{}'", query));
        return;
    }

    output.println(format!(
        "\n{} {} for '{}':",
        matches.len().to_string().bright_cyan().bold(),
        if matches.len() == 1 { "match" } else { "matches" },
        query
    ));
    for (n, event) in matches.iter().take(limit).enumerate() {
        output.println(format!("{:>3}. {}", n + 1, event.display_title().bold()));
        output.println(format!(
            "     {} | {}",
            event.channel_or_unknown().bright_black(),
            event.watched_label()
        ));
        if let Some(url) = &event.url {
            output.println(format!("     {}", url.bright_blue()));
        }
    }
    if matches.len() > limit {
        output.println(format!("... and {} more", matches.len() - limit));
    }
}
