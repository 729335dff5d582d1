pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AnalyticsConfig, Config, ExportConfig, TakeoutConfig, YouTubeConfig};
pub use credentials::CredentialStore;
pub use paths::{PathManager, home_override};
