//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Approval Report - PO to President approval time by year and program
#[derive(Parser, Debug)]
#[command(
    name = "approval-report",
    author,
    version,
    about = "Approval time report by year and program",
    long_about = "Measures the time between PO approval and president approval for every \n\
                  record in an approval event export, joins the program of each request \n\
                  and writes yearly per-program averages (calendar days and weekdays).\n\n\
                  Without a subcommand, `run` is executed with default settings."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        env = "APPROVAL_REPORT_VERBOSE"
    )]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "APPROVAL_REPORT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the report and write it
    Run(RunArgs),

    /// Load and check both inputs without writing output
    Validate(ValidateArgs),

    /// Display the effective configuration
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "APPROVAL_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the approvals input path
    #[arg(long)]
    pub approvals: Option<PathBuf>,

    /// Override the requests input path
    #[arg(long)]
    pub requests: Option<PathBuf>,

    /// Override the output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not print the report table to stdout
    #[arg(long)]
    pub no_table: bool,

    /// Resolve configuration and exit without reading inputs
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "APPROVAL_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the approvals input path
    #[arg(long)]
    pub approvals: Option<PathBuf>,

    /// Override the requests input path
    #[arg(long)]
    pub requests: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "APPROVAL_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
