pub mod api;
pub mod auth;
pub mod client;

pub use auth::authenticate as youtube_authenticate;
pub use client::YouTubeClient;
