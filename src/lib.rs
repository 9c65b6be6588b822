// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod report;
pub mod sim;
pub mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::clock::SystemClock;
use crate::config::{ConfigFile, resolve_config};
use crate::engine::{SimCore, SimOptions, spawn_simulation};
use crate::report::Reporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (+ CLI overrides)
/// - the core simulation and its async runtime
/// - stdout reporting of snapshots
/// - duration limit and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = resolve_config(args.config.as_deref().map(Path::new))?;
    if args.seed.is_some() {
        cfg.set_seed(args.seed);
    }

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let options = SimOptions {
        tick_limit: args.ticks,
    };

    let core = SimCore::new(&cfg, options);
    let (handle, join) = spawn_simulation(core, SystemClock::new());
    let mut snapshots = handle.subscribe();

    // Ctrl-C → graceful shutdown.
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = handle.shutdown().await;
        });
    }

    // Optional wall-clock limit.
    if let Some(secs) = args.duration {
        let handle = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            info!(secs, "duration elapsed; shutting down");
            let _ = handle.shutdown().await;
        });
    }

    handle.start().await?;
    info!(
        generation_period_ms = cfg.timing().generation_period_ms,
        engine_period_ms = cfg.timing().engine_period_ms,
        tick_limit = ?args.ticks,
        "simulation running"
    );

    let mut reporter = Reporter::new(args.format, std::io::stdout());
    let mut last = snapshots.borrow_and_update().clone();
    reporter.observe(&last)?;

    // The sender lives inside the runtime, so this ends when it exits.
    while snapshots.changed().await.is_ok() {
        last = snapshots.borrow_and_update().clone();
        reporter.observe(&last)?;
    }

    match join.await {
        Ok(result) => result?,
        Err(e) => warn!(error = %e, "simulation task ended abnormally"),
    }

    reporter.summary(&last)?;
    debug!("checkflow finished");
    Ok(())
}

/// Dry-run output: the resolved configuration as TOML.
fn print_dry_run(cfg: &ConfigFile) -> Result<()> {
    println!("checkflow dry-run (resolved configuration)");
    println!();
    print!("{}", toml::to_string_pretty(cfg)?);

    debug!("dry-run complete (no simulation)");
    Ok(())
}
