use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// Polls configured URLs and reports whether they meet their success conditions.
#[derive(Debug, Parser)]
#[command(name = "urlprobe-agent", version, about)]
pub struct Cli {
    /// Configuration document (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Also append plain-text outcomes to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Probe timeout in seconds, overrides preferences.timeoutSeconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: Option<u64>,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    pub check: bool,
}
