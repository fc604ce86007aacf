use super::plugin_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "onelast",
    version,
    about = "Turn images into One Last Kiss style artwork",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "ONELAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Conversion service endpoint.
    #[arg(long, env = "ONELAST_API_URL")]
    pub api_url: Option<String>,

    /// Maximum images per invocation.
    #[arg(long)]
    pub max_images: Option<usize>,

    /// Maximum upload size in megabytes.
    #[arg(long)]
    pub max_file_size_mb: Option<u64>,

    /// Directory generated images are written to.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// JSON object overriding the default conversion options.
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    /// Image quoted by the command (URL, path, file:// or base64:// reference).
    #[arg(long = "reply", value_name = "REF")]
    pub replies: Vec<String>,

    /// Images attached to the command.
    #[arg(value_name = "REF")]
    pub images: Vec<String>,
}
