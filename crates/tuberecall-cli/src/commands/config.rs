use super::fetch_ui::is_interactive;
use super::load::load_config;
use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use yt_history_config::{Config, CredentialStore, PathManager};
use yt_history_sources::youtube::auth::load_client_secrets;
use yt_history_sources::YouTubeClient;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::Youtube { client_secrets, max_results, no_auth } => {
            configure_youtube(client_secrets, max_results, no_auth, output).await
        }
        ConfigCommands::Takeout { file, search_dir } => configure_takeout(file, search_dir, output),
    }
}

fn section_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn tick(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn path_or_unset(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "<not set>".to_string())
}

fn show_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = load_config(&path_manager)?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {:#}", e))?;
    let token_status = match (cred_store.get_youtube_access_token(), cred_store.get_youtube_token_expires()) {
        (None, _) => "not authorized".to_string(),
        (Some(_), Some(expires)) => format!("stored (expires {})", expires.format("%Y-%m-%d %H:%M UTC")),
        (Some(_), None) => "stored".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!("No configuration file at {}; showing defaults", config_file.display()));
            }

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}\n", info_table);

            let takeout = section_table(
                "Takeout",
                vec![
                    ("File", path_or_unset(config.takeout.file.as_ref())),
                    ("Search Directory", config.takeout.search_dir.display().to_string()),
                ],
            );
            println!("{}\n", takeout);

            let youtube = section_table(
                "YouTube API",
                vec![
                    ("Enabled", tick(config.youtube.enabled)),
                    ("Client Secrets", path_or_unset(config.youtube.client_secrets_file.as_ref())),
                    ("Max Results", config.youtube.max_results.to_string()),
                    ("Redirect Port", config.youtube.redirect_port.to_string()),
                    ("Token", token_status),
                ],
            );
            println!("{}\n", youtube);

            let other = section_table(
                "Output",
                vec![
                    ("Export File", config.export.default_file.display().to_string()),
                    ("Top Channels", config.analytics.top_channels.to_string()),
                ],
            );
            println!("{}", other);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "config": serde_json::to_value(&config)?,
                "youtube_token": token_status,
            }));
        }
    }

    Ok(())
}

fn save(config: &Config, path_manager: &PathManager) -> Result<()> {
    let config_file = path_manager.config_file();
    config
        .validate()
        .map_err(|e| eyre!("Refusing to save invalid configuration: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {:#}", config_file.display(), e))?;
    Ok(())
}

async fn configure_youtube(
    client_secrets: Option<PathBuf>,
    max_results: Option<u32>,
    no_auth: bool,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = load_config(&path_manager)?;

    let secrets_path = match client_secrets {
        Some(path) => path,
        None => {
            let current = config
                .youtube
                .client_secrets_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "client_secrets.json".to_string());
            PathBuf::from(prompts::prompt_string("Path to client_secrets.json", Some(&current))?)
        }
    };

    load_client_secrets(&secrets_path).map_err(|e| eyre!("{:#}", e))?;

    config.youtube.enabled = true;
    config.youtube.client_secrets_file = Some(secrets_path);
    if let Some(max_results) = max_results {
        config.youtube.max_results = max_results;
    }
    save(&config, &path_manager)?;
    output.success("YouTube API configuration saved");

    if no_auth || (is_interactive() && !prompts::prompt_yes_no("Authorize YouTube access now?", Some(true))?) {
        return Ok(());
    }

    let mut client = YouTubeClient::from_config(&config.youtube, path_manager.credentials_file())
        .map_err(|e| eyre!("{:#}", e))?;
    client
        .authenticate()
        .await
        .map_err(|e| eyre!("YouTube authorization failed: {:#}", e))?;
    output.success(format!(
        "Authorized YouTube access for channel {}",
        client.channel_title().unwrap_or("(unknown)")
    ));
    Ok(())
}

fn configure_takeout(file: Option<PathBuf>, search_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = load_config(&path_manager)?;

    if file.is_none() && search_dir.is_none() {
        let current = path_or_unset(config.takeout.file.as_ref());
        let entered = prompts::prompt_string(
            &format!("Takeout watch-history file (empty to use discovery, current: {})", current),
            None,
        )?;
        let entered = entered.trim();
        config.takeout.file = if entered.is_empty() { None } else { Some(PathBuf::from(entered)) };
    }

    if let Some(file) = file {
        if !file.is_file() {
            output.warn(format!("{} does not exist yet", file.display()));
        }
        config.takeout.file = Some(file);
    }
    if let Some(dir) = search_dir {
        config.takeout.search_dir = dir;
    }

    save(&config, &path_manager)?;
    output.success(format!("Takeout configuration saved to {}", path_manager.config_file().display()));
    Ok(())
}
