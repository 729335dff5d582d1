pub mod clear;
pub mod config;
pub mod export;
pub mod fetch_ui;
pub mod find_takeout;
pub mod interactive;
pub mod load;
pub mod prompts;
pub mod search;
pub mod summary;
