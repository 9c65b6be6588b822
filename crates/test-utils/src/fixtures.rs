#![allow(dead_code)]

use checkflow::clock::Timestamp;
use checkflow::config::ConfigFile;
use checkflow::engine::{SimCore, SimEvent, SimOptions};
use checkflow::sim::CheckJob;

/// A job created at `start_ms` with a fixed outcome.
pub fn job_at(seq: u64, start_ms: u64, success: bool) -> CheckJob {
    CheckJob::new(
        seq,
        "SJC",
        format!("monitor-{}", seq % 10),
        Timestamp::from_millis(start_ms),
        success,
    )
}

/// Core seeded from `cfg` (which should carry a seed) with no tick limit.
pub fn seeded_core(cfg: &ConfigFile) -> SimCore {
    SimCore::new(cfg, SimOptions::default())
}

/// Drive `core` through `ticks` generation periods, stepping the engine
/// every `engine_ms` in between, starting at `from_ms`.
///
/// Returns the instant after the last engine step.
pub fn run_periods(
    core: &mut SimCore,
    from_ms: u64,
    ticks: u64,
    generation_ms: u64,
    engine_ms: u64,
) -> u64 {
    let mut now = from_ms;
    for _ in 0..ticks {
        let tick_at = now + generation_ms;
        while now + engine_ms < tick_at {
            now += engine_ms;
            core.step(SimEvent::EngineStep, Timestamp::from_millis(now));
        }
        now = tick_at;
        core.step(SimEvent::GenerationTick, Timestamp::from_millis(now));
        core.step(SimEvent::EngineStep, Timestamp::from_millis(now));
    }
    now
}
