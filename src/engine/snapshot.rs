// src/engine/snapshot.rs

use serde::Serialize;

use crate::graph::Projection;
use crate::sim::Stats;

/// Everything a presentation layer needs at one instant.
///
/// Built in one go from a fully updated core, so counters and graph always
/// agree with each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub running: bool,
    /// Generation periods elapsed since the last start.
    pub tick_count: u64,
    pub live_jobs: usize,
    pub stats: Stats,
    pub graph: Projection,
}
