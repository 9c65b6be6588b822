// src/engine/event_handlers.rs

//! Event handling logic for the core simulation.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::Timestamp;
use crate::engine::core::{PulseState, SimParams, SimState};
use crate::sim::{TickGenerator, advance};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// (Re)arm both periodic callbacks, first firing one period from now.
    StartTimers,
    /// Cancel both periodic callbacks.
    StopTimers,
    /// Fire `SimEvent::PulseElapsed { seq }` after `after`, replacing any
    /// pending pulse timer.
    ArmPulse { seq: u64, after: Duration },
    /// Drop any pending pulse timer.
    CancelPulse,
    /// Request that the runtime exits (tick limit reached and drained).
    RequestExit,
}

/// Decision returned by the core after handling a single `SimEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    fn idle() -> Self {
        Self::continue_with(Vec::new())
    }
}

/// Start (or restart) the simulation from a clean slate.
///
/// Stats and the tick count are zeroed here, not on stop. Runner ids keep
/// counting so a restart never reuses one.
pub(crate) fn handle_start(state: &mut SimState) -> CoreStep {
    if state.running {
        info!("simulation restart requested; resetting live state");
    } else {
        info!("simulation started");
    }

    state.running = true;
    state.jobs.clear();
    state.stats.reset();
    state.tick_count = 0;
    state.pulse.active = false;

    CoreStep::continue_with(vec![CoreCommand::CancelPulse, CoreCommand::StartTimers])
}

/// Stop the simulation.
///
/// The live set is discarded without being counted; stats and the tick
/// count stay as last observed.
pub(crate) fn handle_stop(state: &mut SimState) -> CoreStep {
    if state.running {
        info!(
            discarded = state.jobs.len(),
            total = state.stats.total(),
            "simulation stopped"
        );
    }

    state.running = false;
    state.jobs.clear();
    state.pulse.active = false;

    CoreStep::continue_with(vec![CoreCommand::StopTimers, CoreCommand::CancelPulse])
}

/// Stop, then zero stats, tick count and the id sequence.
pub(crate) fn handle_reset(state: &mut SimState, generator: &mut TickGenerator) -> CoreStep {
    let step = handle_stop(state);

    state.stats.reset();
    state.tick_count = 0;
    state.pulse = PulseState::default();
    generator.reset_ids();
    info!("simulation reset");

    step
}

/// One generation period: new batch plus a scheduler pulse.
pub(crate) fn handle_generation_tick<R: Rng>(
    state: &mut SimState,
    generator: &mut TickGenerator,
    rng: &mut R,
    params: &SimParams,
    now: Timestamp,
) -> CoreStep {
    if !state.running {
        debug!("generation tick while stopped; ignoring");
        return CoreStep::idle();
    }

    if let Some(limit) = params.options.tick_limit {
        if state.tick_count >= limit {
            debug!(limit, "tick limit reached; not generating");
            return CoreStep::idle();
        }
    }

    state.tick_count += 1;
    let batch = generator.generate(now, rng);
    debug!(
        tick = state.tick_count,
        batch = batch.len(),
        "dispatching check batch"
    );
    state.jobs.admit(batch);

    state.pulse.seq += 1;
    state.pulse.active = true;

    CoreStep::continue_with(vec![CoreCommand::ArmPulse {
        seq: state.pulse.seq,
        after: params.pulse_duration,
    }])
}

/// One engine period: age, retire and count jobs.
pub(crate) fn handle_engine_step(state: &mut SimState, params: &SimParams, now: Timestamp) -> CoreStep {
    if !state.running {
        return CoreStep::idle();
    }

    advance(&mut state.jobs, &mut state.stats, now, &params.thresholds);

    // With a tick limit, exit once every generated job has been counted.
    if let Some(limit) = params.options.tick_limit {
        if state.tick_count >= limit && state.jobs.is_empty() {
            info!(
                ticks = state.tick_count,
                total = state.stats.total(),
                "tick limit reached and live set drained; requesting exit"
            );
            return CoreStep {
                commands: vec![CoreCommand::StopTimers, CoreCommand::RequestExit],
                keep_running: false,
            };
        }
    }

    CoreStep::idle()
}

/// Clear the pulse if `seq` belongs to the most recent tick.
pub(crate) fn handle_pulse_elapsed(state: &mut SimState, seq: u64) -> CoreStep {
    if seq == state.pulse.seq {
        state.pulse.active = false;
    } else {
        debug!(seq, latest = state.pulse.seq, "stale pulse timer; ignoring");
    }
    CoreStep::idle()
}

pub(crate) fn handle_shutdown(state: &mut SimState) -> CoreStep {
    info!(running = state.running, "shutdown requested");
    CoreStep {
        commands: vec![CoreCommand::StopTimers, CoreCommand::CancelPulse],
        keep_running: false,
    }
}
