use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{clear, config, export, find_takeout, interactive, search, summary};
use std::path::PathBuf;
use yt_history_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "tuberecall")]
#[command(about = "TubeRecall - Search and summarize your YouTube watch history")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    /// (`--log-file` alone uses the default log directory)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

/// Where watch history is loaded from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Google Takeout watch-history JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "api")]
    pub takeout: Option<PathBuf>,

    /// Fetch recent activity from the YouTube Data API instead of a Takeout file
    #[arg(long, action = ArgAction::SetTrue)]
    pub api: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show watch statistics and top channels
    #[command(long_about = "Load the watch history and print totals, the date range, the average videos per day and the most watched channels. Records that could not be read are counted by reason.")]
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of channels to rank (defaults to analytics.top_channels)
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
    /// Search titles, channels and descriptions
    Search {
        /// Case-insensitive text to look for
        query: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Maximum number of results to print
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Also export all matches to this JSON file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Export watch history to a JSON file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Only export events matching this query
        #[arg(long)]
        query: Option<String>,

        /// Destination file (defaults to export.default_file)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Interactive search and summary menu
    Interactive {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List candidate Takeout watch-history files
    FindTakeout {
        /// Directory to search (defaults to takeout.search_dir)
        dir: Option<PathBuf>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    #[command(long_about = "Clear stored data. Use --credentials to remove saved YouTube OAuth tokens.")]
    Clear {
        /// Clear stored YouTube tokens
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Configure the YouTube Data API fallback
    #[command(long_about = "Configure the YouTube Data API fallback. You need an OAuth client (Desktop app) from the Google Cloud Console; download its client_secrets.json and point this command at it.")]
    Youtube {
        /// Path to client_secrets.json (if not provided, will prompt)
        #[arg(long, value_name = "FILE")]
        client_secrets: Option<PathBuf>,

        /// Maximum activity items to fetch
        #[arg(long)]
        max_results: Option<u32>,

        /// Skip the OAuth authorization after saving
        #[arg(long, action = ArgAction::SetTrue)]
        no_auth: bool,
    },

    /// Configure Takeout file location
    Takeout {
        /// Watch-history file to use by default
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Directory searched when no file is set
        #[arg(long, value_name = "DIR")]
        search_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = logging::resolve_log_file(cli.log_file.clone(), &PathManager::default())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Summary { source, top } => summary::run_summary(&source, top, &output).await,
        Commands::Search { query, source, limit, export } => {
            search::run_search(&query, &source, limit, export, &output).await
        }
        Commands::Export { source, query, file } => export::run_export(&source, query, file, &output).await,
        Commands::Interactive { source } => interactive::run_interactive(&source, &output).await,
        Commands::FindTakeout { dir } => find_takeout::run_find_takeout(dir, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output).await
        }
        Commands::Clear { credentials } => clear::run_clear(credentials, &output),
    }
}
