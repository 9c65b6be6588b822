// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `checkflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "checkflow",
    version,
    about = "Simulate health-check dispatch, execution and result writes as a live graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Checkflow.toml` in the current working directory if it
    /// exists, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Seed for the random source (overrides `[generator].seed`).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Stop after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Stop generating after N ticks and exit once in-flight checks finish.
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,

    /// Output format for progress lines on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHECKFLOW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve + validate config, print it, but don't run the simulation.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// How progress is written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable counter line per change.
    Text,
    /// One JSON snapshot (counters and graph) per change.
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
