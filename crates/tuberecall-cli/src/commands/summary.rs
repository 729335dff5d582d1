use super::load::load_history;
use crate::output::Output;
use crate::SourceArgs;
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use yt_history_core::{summarize_top, HistoryIndex, RejectionTally, Summary};

pub async fn run_summary(source: &SourceArgs, top: Option<usize>, output: &Output) -> Result<()> {
    let loaded = load_history(source, output).await?;
    let top = top.unwrap_or(loaded.config.analytics.top_channels);
    let origin = loaded.origin.to_string();
    let total_seen = loaded.report.total_seen;
    let tally = loaded.report.tally.clone();
    let index = loaded.report.into_index();

    let summary = summarize_top(&index, top);

    if output.is_human() {
        print_summary(&summary, output);
        print_rejections(&tally, total_seen, output);
    } else {
        output.json(&json!({
            "source": origin,
            "summary": serde_json::to_value(&summary)?,
            "records_seen": total_seen,
            "rejections": serde_json::to_value(&tally)?,
        }));
    }
    Ok(())
}

pub fn channel_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Channel").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Videos").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Share").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for (rank, channel) in summary.top_channels.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&channel.name),
            Cell::new(channel.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", channel.percentage)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

/// Human rendering shared with the interactive menu
pub fn print_summary(summary: &Summary, output: &Output) {
    output.println(format!("\n{}", "Watch History Summary".bright_cyan().bold()));
    output.println(format!("Total videos watched: {}", summary.total_videos));
    if summary.removed_videos > 0 {
        output.println(format!("Removed or private videos: {}", summary.removed_videos));
    }
    output.println(format!("Unique channels: {}", summary.unique_channels));

    match (&summary.date_range, summary.span_days, summary.average_per_day) {
        (Some(range), Some(days), Some(average)) => {
            output.println(format!(
                "Date range: {} to {} ({} days)",
                range.earliest.format("%Y-%m-%d"),
                range.latest.format("%Y-%m-%d"),
                days
            ));
            output.println(format!("Average videos per day: {:.1}", average));
        }
        _ => {
            output.warn("No watch history to summarize");
            return;
        }
    }

    if summary.top_channels.is_empty() {
        output.println("No channel information available");
    } else {
        output.println(format!("\nTop {} channels:", summary.top_channels.len()));
        output.println(channel_table(summary).to_string());
    }
}

fn print_rejections(tally: &RejectionTally, total_seen: usize, output: &Output) {
    if tally.is_empty() {
        return;
    }
    output.println(format!("\n{} of {} records skipped:", tally.total(), total_seen));
    for (reason, count) in tally.iter() {
        output.println(format!("  {:<22} {}", reason.to_string(), count));
    }
}

/// One-screen summary for an already loaded index
pub fn show_index_summary(index: &HistoryIndex, top: usize, output: &Output) -> Result<()> {
    let summary = summarize_top(index, top);
    if output.is_human() {
        print_summary(&summary, output);
    } else {
        output.json(&serde_json::to_value(&summary)?);
    }
    Ok(())
}
