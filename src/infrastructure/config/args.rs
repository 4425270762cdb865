use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments. Flags override the config file.
#[derive(Debug, Parser)]
#[command(
    name = "teleview",
    version,
    about = "Resolve images through the shared cache with placeholder fallback",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory holding `placeholder.png` and other assets.
    #[arg(long, value_name = "PATH")]
    pub assets_dir: Option<PathBuf>,

    /// Maximum number of decoded images kept in memory.
    #[arg(long)]
    pub max_entries: Option<usize>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum simultaneous fetches.
    #[arg(long)]
    pub max_concurrent_fetches: Option<usize>,

    /// Image links to resolve.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,
}
