use yt_history_models::{ExportRecord, WatchEvent};

/// Flatten events into export records, keeping their order
pub fn export_records<'a, I>(events: I) -> Vec<ExportRecord>
where
    I: IntoIterator<Item = &'a WatchEvent>,
{
    events.into_iter().map(ExportRecord::from).collect()
}
