pub mod export;
pub mod raw_record;
pub mod source_kind;
pub mod watch_event;

pub use export::ExportRecord;
pub use raw_record::{ActivityContentDetails, ActivityItem, ActivitySnippet, RawRecord, ResourceId, ResourceRef, Subtitle, TakeoutEntry, VideoRef};
pub use source_kind::SourceKind;
pub use watch_event::{WatchEvent, watch_url};
