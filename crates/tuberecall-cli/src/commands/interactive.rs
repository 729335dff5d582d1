use super::export::export_to;
use super::load::load_history;
use super::prompts;
use super::search::print_matches;
use super::summary::show_index_summary;
use crate::output::Output;
use crate::SourceArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use yt_history_core::{search, HistoryIndex};

const MENU: &[&str] = &["Search history", "Show summary", "Export search results", "Export everything", "Quit"];

const RESULTS_SHOWN: usize = 20;

pub async fn run_interactive(source: &SourceArgs, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(eyre!("interactive mode needs --output human"));
    }

    let (config, index) = load_history(source, output).await?.into_index();
    if index.is_empty() {
        output.warn("No watch history loaded");
        return Ok(());
    }

    let default_file = config.export.default_file.display().to_string();
    let mut last_query: Option<String> = None;

    loop {
        output.println("");
        match prompts::prompt_select("What would you like to do?", MENU)? {
            0 => {
                let query = prompts::prompt_string("Search for", None)?;
                let matches = search(&index, &query);
                print_matches(&query, &matches, RESULTS_SHOWN, output);
                last_query = Some(query);
            }
            1 => {
                let top = prompts::prompt_number("How many top channels", config.analytics.top_channels)?;
                show_index_summary(&index, top, output)?;
            }
            2 => {
                let query = prompts::prompt_string("Export results for", last_query.as_deref())?;
                let path = prompts::prompt_string("File", Some(&default_file))?;
                report(export_query(&index, &query, PathBuf::from(path), output), output);
            }
            3 => {
                let path = prompts::prompt_string("File", Some(&default_file))?;
                let all: Vec<_> = index.iter().collect();
                report(export_to(&PathBuf::from(path), &all, output), output);
            }
            _ => break,
        }
    }

    output.info("Goodbye!");
    Ok(())
}

fn export_query(index: &HistoryIndex, query: &str, path: PathBuf, output: &Output) -> Result<()> {
    let matches = search(index, query);
    export_to(&path, &matches, output)
}

/// Menu actions report failures and keep the loop alive
fn report(result: Result<()>, output: &Output) {
    if let Err(e) = result {
        output.error(format!("{}", e));
    }
}
