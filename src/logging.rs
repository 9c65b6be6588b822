// src/logging.rs

//! Logging setup for `checkflow` using `tracing` + `tracing-subscriber`.
//!
//! Filter precedence:
//! 1. `--log-level` applies to checkflow's own targets; other crates stay at `warn`.
//! 2. `CHECKFLOW_LOG` holds full `EnvFilter` directives
//!    (e.g. `checkflow::sim=trace,info`).
//! 3. Otherwise checkflow logs at `info`.
//!
//! Logs go to stderr; stdout is reserved for simulation reports.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` flag is given.
pub const LOG_ENV_VAR: &str = "CHECKFLOW_LOG";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    let env = env.map(str::trim).filter(|s| !s.is_empty());

    match (cli_level, env) {
        (Some(level), _) => Ok(EnvFilter::new(crate_directive(level))),
        (None, Some(directives)) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV_VAR} directives: {directives:?}")),
        (None, None) => Ok(EnvFilter::new(crate_directive(LogLevel::Info))),
    }
}

/// `warn` for dependencies, `level` for checkflow itself.
fn crate_directive(level: LogLevel) -> String {
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };
    format!("warn,checkflow={level}")
}
