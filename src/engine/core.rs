// src/engine/core.rs

//! Pure core simulation state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`SimEvent`]s together with the current instant and produces:
//! - an updated simulation state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading controls from a channel
//! - driving the generation and engine intervals
//! - arming the scheduler pulse timer
//! - publishing snapshots
//!
//! Because time arrives as an argument and randomness comes from a seeded
//! generator, the core can be tested without Tokio, channels or real time.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::Timestamp;
use crate::config::ConfigFile;
use crate::engine::event_handlers::{
    CoreStep, handle_engine_step, handle_generation_tick, handle_pulse_elapsed,
    handle_reset, handle_shutdown, handle_start, handle_stop,
};
use crate::engine::snapshot::Snapshot;
use crate::engine::{SimEvent, SimOptions};
use crate::graph::GraphProjector;
use crate::sim::{JobSet, PhaseThresholds, Stats, TickGenerator};

/// Scheduler pulse bookkeeping.
///
/// Each tick bumps `seq`; only the timer armed with the latest `seq` may
/// clear the pulse, so overlapping pulses cannot cut each other short.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PulseState {
    pub(crate) seq: u64,
    pub(crate) active: bool,
}

/// Mutable simulation state.
#[derive(Debug, Default)]
pub(crate) struct SimState {
    pub(crate) running: bool,
    pub(crate) jobs: JobSet,
    pub(crate) stats: Stats,
    pub(crate) tick_count: u64,
    pub(crate) pulse: PulseState,
}

/// Fixed parameters derived from configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimParams {
    pub(crate) thresholds: PhaseThresholds,
    pub(crate) pulse_duration: Duration,
    pub(crate) generation_period: Duration,
    pub(crate) engine_period: Duration,
    pub(crate) options: SimOptions,
}

/// Pure core simulation.
///
/// This owns:
/// - the live job set and stats (single writer)
/// - the tick generator and its RNG
/// - the projector used to build snapshots
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct SimCore {
    state: SimState,
    params: SimParams,
    generator: TickGenerator,
    rng: StdRng,
    projector: GraphProjector,
}

impl SimCore {
    /// Build a core from validated config.
    ///
    /// Uses `[generator].seed` if set, otherwise OS entropy.
    pub fn new(cfg: &ConfigFile, options: SimOptions) -> Self {
        let rng = match cfg.generator().seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(cfg, options, rng)
    }

    /// Build a core with an explicit random source.
    pub fn with_rng(cfg: &ConfigFile, options: SimOptions, rng: StdRng) -> Self {
        let timing = cfg.timing();
        Self {
            state: SimState::default(),
            params: SimParams {
                thresholds: PhaseThresholds::from_config(cfg.lifecycle()),
                pulse_duration: timing.pulse(),
                generation_period: timing.generation_period(),
                engine_period: timing.engine_period(),
                options,
            },
            generator: TickGenerator::from_config(cfg.generator()),
            rng,
            projector: GraphProjector::from_config(cfg),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    pub fn stats(&self) -> Stats {
        self.state.stats
    }

    pub fn jobs(&self) -> &JobSet {
        &self.state.jobs
    }

    pub fn scheduler_pulsing(&self) -> bool {
        self.state.pulse.active
    }

    pub fn generator(&self) -> &TickGenerator {
        &self.generator
    }

    pub fn generation_period(&self) -> Duration {
        self.params.generation_period
    }

    pub fn engine_period(&self) -> Duration {
        self.params.engine_period
    }

    /// Handle a single event at instant `now`, updating core state and
    /// returning the resulting commands for the IO shell.
    pub fn step(&mut self, event: SimEvent, now: Timestamp) -> CoreStep {
        match event {
            SimEvent::Start => handle_start(&mut self.state),
            SimEvent::Stop => handle_stop(&mut self.state),
            SimEvent::Reset => handle_reset(&mut self.state, &mut self.generator),
            SimEvent::GenerationTick => handle_generation_tick(
                &mut self.state,
                &mut self.generator,
                &mut self.rng,
                &self.params,
                now,
            ),
            SimEvent::EngineStep => handle_engine_step(&mut self.state, &self.params, now),
            SimEvent::PulseElapsed { seq } => handle_pulse_elapsed(&mut self.state, seq),
            SimEvent::ShutdownRequested => handle_shutdown(&mut self.state),
        }
    }

    /// Read surface: counters plus a fresh projection of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let graph = if self.state.running {
            self.projector
                .project(self.state.jobs.as_slice(), self.state.pulse.active)
        } else {
            self.projector.idle()
        };

        Snapshot {
            running: self.state.running,
            tick_count: self.state.tick_count,
            live_jobs: self.state.jobs.len(),
            stats: self.state.stats,
            graph,
        }
    }
}
