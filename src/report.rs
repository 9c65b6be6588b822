// src/report.rs

//! Stdout reporting of snapshots for the CLI.

use std::io::Write;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::engine::Snapshot;
use crate::sim::Stats;

/// Counters that decide whether a snapshot is worth a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReportKey {
    running: bool,
    tick_count: u64,
    live_jobs: usize,
    stats: Stats,
}

impl From<&Snapshot> for ReportKey {
    fn from(s: &Snapshot) -> Self {
        Self {
            running: s.running,
            tick_count: s.tick_count,
            live_jobs: s.live_jobs,
            stats: s.stats,
        }
    }
}

/// Writes one line per snapshot whose counters changed.
///
/// Phase-only changes (which alter the graph but no counter) are skipped to
/// keep the output readable at engine-step frequency.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    format: OutputFormat,
    out: W,
    last: Option<ReportKey>,
}

impl<W: Write> Reporter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            out,
            last: None,
        }
    }

    /// Returns whether a line was written.
    pub fn observe(&mut self, snapshot: &Snapshot) -> Result<bool> {
        let key = ReportKey::from(snapshot);
        if self.last == Some(key) {
            return Ok(false);
        }
        self.last = Some(key);

        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", counters_line(snapshot))?,
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(snapshot)?)?,
        }
        self.out.flush()?;
        Ok(true)
    }

    /// Final line written when the simulation ends.
    pub fn summary(&mut self, snapshot: &Snapshot) -> Result<()> {
        let stats = snapshot.stats;
        match self.format {
            OutputFormat::Text => writeln!(
                self.out,
                "finished: ticks={} total={} success={} failed={}",
                snapshot.tick_count,
                stats.total(),
                stats.success(),
                stats.failed()
            )?,
            OutputFormat::Json => writeln!(
                self.out,
                "{}",
                serde_json::json!({
                    "finished": true,
                    "tick_count": snapshot.tick_count,
                    "stats": stats,
                })
            )?,
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn counters_line(snapshot: &Snapshot) -> String {
    let stats = snapshot.stats;
    format!(
        "{} tick={} live={} total={} success={} failed={}",
        if snapshot.running { "running" } else { "stopped" },
        snapshot.tick_count,
        snapshot.live_jobs,
        stats.total(),
        stats.success(),
        stats.failed()
    )
}
