//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Booking tracked when none is given
pub const DEFAULT_BOOKING_ID: &str = "SINI25432400";

/// Seatrack - Look up vessel, voyage and arrival for a shipping booking.
#[derive(Debug, Parser)]
#[command(name = "seatrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Booking ID to track
    #[arg(default_value = DEFAULT_BOOKING_ID)]
    pub booking_id: String,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Ignore any cached record and run the agent
    #[arg(long)]
    pub no_cache: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Model API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// JSON format (default)
    Json,
    /// Table format
    Table,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}
