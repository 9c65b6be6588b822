// src/sim/generator.rs

//! Tick generator: manufactures a randomized batch of check jobs per tick.

use rand::Rng;
use tracing::debug;

use crate::clock::Timestamp;
use crate::config::GeneratorSection;
use crate::sim::job::CheckJob;

/// Produces new jobs. It never reads or mutates existing ones.
///
/// The sequence counter behind job and runner ids only moves forward; it
/// survives stop/start and is rewound only by [`TickGenerator::reset_ids`].
#[derive(Debug, Clone)]
pub struct TickGenerator {
    pops: Vec<String>,
    batch_min: usize,
    batch_max: usize,
    success_probability: f64,
    monitor_pool: u32,
    next_seq: u64,
}

impl TickGenerator {
    /// Build from a validated `[generator]` section.
    pub fn from_config(cfg: &GeneratorSection) -> Self {
        Self {
            pops: cfg.pops.clone(),
            batch_min: cfg.batch_min,
            batch_max: cfg.batch_max,
            success_probability: cfg.success_probability,
            monitor_pool: cfg.monitor_pool,
            next_seq: 0,
        }
    }

    /// Sequence number the next generated job will receive.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn reset_ids(&mut self) {
        self.next_seq = 0;
    }

    /// Generate one tick's batch, all stamped with `now`.
    ///
    /// Draw order: batch size, then per job PoP, outcome, monitor label.
    pub fn generate<R: Rng>(&mut self, now: Timestamp, rng: &mut R) -> Vec<CheckJob> {
        let count = rng.random_range(self.batch_min..=self.batch_max);
        let mut batch = Vec::with_capacity(count);

        for _ in 0..count {
            let pop = &self.pops[rng.random_range(0..self.pops.len())];
            let success = rng.random_bool(self.success_probability);
            let monitor = format!("monitor-{}", rng.random_range(0..self.monitor_pool));

            batch.push(CheckJob::new(self.next_seq, pop.as_str(), monitor, now, success));
            self.next_seq += 1;
        }

        debug!(
            count,
            first_seq = self.next_seq - count as u64,
            at_ms = now.as_millis(),
            "generated check batch"
        );
        batch
    }
}
