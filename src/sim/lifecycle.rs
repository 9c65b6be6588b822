// src/sim/lifecycle.rs

//! Job lifecycle engine.
//!
//! Phases are recomputed from each job's absolute age on every engine step
//! rather than stepped one at a time, so irregular or skipped steps can never
//! leave a job stuck. Completion is folded into [`Stats`] and the job is
//! removed from the [`JobSet`] in the same call to [`advance`].

use std::time::Duration;

use tracing::{debug, trace};

use crate::clock::Timestamp;
use crate::config::LifecycleSection;
use crate::sim::job::{CheckJob, JobSet};
use crate::sim::stats::Stats;
use crate::types::{Phase, RunnerId};

/// Ages at which a job enters `executing`, `writing` and `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseThresholds {
    executing_at: Duration,
    writing_at: Duration,
    complete_at: Duration,
}

impl PhaseThresholds {
    /// Build from a validated `[lifecycle]` section.
    pub fn from_config(cfg: &LifecycleSection) -> Self {
        Self {
            executing_at: Duration::from_millis(cfg.executing_at_ms),
            writing_at: Duration::from_millis(cfg.writing_at_ms),
            complete_at: Duration::from_millis(cfg.complete_at_ms),
        }
    }

    /// The phase a job of the given age is in.
    pub fn phase_for_age(&self, age: Duration) -> Phase {
        if age < self.executing_at {
            Phase::Dispatch
        } else if age < self.writing_at {
            Phase::Executing
        } else if age < self.complete_at {
            Phase::Writing
        } else {
            Phase::Complete
        }
    }
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self::from_config(&LifecycleSection::default())
    }
}

/// A phase change observed during one engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub runner_id: RunnerId,
    pub from: Phase,
    pub to: Phase,
}

/// What happened during one engine step.
#[derive(Debug, Clone, Default)]
pub struct LifecycleStep {
    /// Jobs that reached `complete`, were counted, and left the live set.
    pub completed: Vec<CheckJob>,
    /// Every phase change, including those into `complete`.
    pub transitions: Vec<PhaseTransition>,
}

/// Run one engine step over the live set.
///
/// 1. recompute every job's phase from `now - start_time`;
/// 2. split off the `complete` jobs;
/// 3. fold them into `stats`;
/// 4. keep only the unfinished jobs in `jobs`.
pub fn advance(
    jobs: &mut JobSet,
    stats: &mut Stats,
    now: Timestamp,
    thresholds: &PhaseThresholds,
) -> LifecycleStep {
    let mut transitions = Vec::new();

    for job in jobs.iter_mut() {
        let from = job.phase();
        let age = now.saturating_since(job.start_time());
        let to = job.advance_to(thresholds.phase_for_age(age));

        if from != to {
            trace!(runner = %job.runner_id(), %from, %to, "phase advanced");
            transitions.push(PhaseTransition {
                runner_id: job.runner_id().clone(),
                from,
                to,
            });
        }
    }

    let completed = jobs.take_completed();
    if !completed.is_empty() {
        stats.fold(&completed);
        debug!(
            completed = completed.len(),
            live = jobs.len(),
            total = stats.total(),
            "folded completed checks into stats"
        );
    }

    LifecycleStep {
        completed,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn phase_boundaries_are_half_open() {
        let t = PhaseThresholds::default();

        assert_eq!(t.phase_for_age(ms(0)), Phase::Dispatch);
        assert_eq!(t.phase_for_age(ms(999)), Phase::Dispatch);
        assert_eq!(t.phase_for_age(ms(1000)), Phase::Executing);
        assert_eq!(t.phase_for_age(ms(1999)), Phase::Executing);
        assert_eq!(t.phase_for_age(ms(2000)), Phase::Writing);
        assert_eq!(t.phase_for_age(ms(2999)), Phase::Writing);
        assert_eq!(t.phase_for_age(ms(3000)), Phase::Complete);
        assert_eq!(t.phase_for_age(ms(60_000)), Phase::Complete);
    }

    #[test]
    fn skipped_steps_jump_straight_to_complete() {
        let mut jobs = JobSet::new();
        let mut stats = Stats::default();
        jobs.admit([CheckJob::new(0, "GRU", "monitor-3", Timestamp::ZERO, false)]);

        let step = advance(
            &mut jobs,
            &mut stats,
            Timestamp::from_millis(10_000),
            &PhaseThresholds::default(),
        );

        assert!(jobs.is_empty());
        assert_eq!(step.completed.len(), 1);
        assert_eq!(
            step.transitions,
            vec![PhaseTransition {
                runner_id: RunnerId::from_seq(0),
                from: Phase::Dispatch,
                to: Phase::Complete,
            }]
        );
        assert_eq!(stats.as_tuple(), (1, 0, 1));
    }

    #[test]
    fn clock_going_backwards_does_not_regress_phase() {
        let mut jobs = JobSet::new();
        let mut stats = Stats::default();
        let t = PhaseThresholds::default();
        jobs.admit([CheckJob::new(0, "SIN", "monitor-0", Timestamp::from_millis(500), true)]);

        advance(&mut jobs, &mut stats, Timestamp::from_millis(2_700), &t);
        assert_eq!(jobs.as_slice()[0].phase(), Phase::Writing);

        let step = advance(&mut jobs, &mut stats, Timestamp::from_millis(600), &t);
        assert_eq!(jobs.as_slice()[0].phase(), Phase::Writing);
        assert!(step.transitions.is_empty());
    }

    #[test]
    fn repeated_steps_at_same_instant_are_idempotent() {
        let mut jobs = JobSet::new();
        let mut stats = Stats::default();
        let t = PhaseThresholds::default();
        jobs.admit([
            CheckJob::new(0, "SYD", "monitor-1", Timestamp::ZERO, true),
            CheckJob::new(1, "SYD", "monitor-2", Timestamp::from_millis(1_000), true),
        ]);

        let now = Timestamp::from_millis(3_000);
        advance(&mut jobs, &mut stats, now, &t);
        let snapshot = jobs.clone();
        let again = advance(&mut jobs, &mut stats, now, &t);

        assert_eq!(jobs, snapshot);
        assert!(again.completed.is_empty());
        assert!(again.transitions.is_empty());
        assert_eq!(stats.as_tuple(), (1, 1, 0));
    }
}
