pub mod error;
pub mod takeout;
pub mod traits;
pub mod youtube;

pub use error::SourceError;
pub use takeout::{TakeoutSource, find_takeout_files, load_takeout_file};
pub use traits::HistorySource;
pub use youtube::{YouTubeClient, youtube_authenticate};
