// src/sim/job.rs

//! Check jobs and the live job set.

use crate::clock::Timestamp;
use crate::types::{JobId, Phase, RunnerId};

/// A simulated check dispatch.
///
/// `start_time` and `success` are fixed at construction and have no setters;
/// `phase` only moves forward (see [`CheckJob::advance_to`]).
#[derive(Debug, Clone, PartialEq)]
pub struct CheckJob {
    id: JobId,
    runner_id: RunnerId,
    pop: String,
    monitor_id: String,
    start_time: Timestamp,
    phase: Phase,
    success: bool,
}

impl CheckJob {
    /// Create a job in `dispatch`. `seq` feeds both the job id and the
    /// runner id.
    pub fn new(
        seq: u64,
        pop: impl Into<String>,
        monitor_id: impl Into<String>,
        start_time: Timestamp,
        success: bool,
    ) -> Self {
        Self {
            id: JobId(seq),
            runner_id: RunnerId::from_seq(seq),
            pop: pop.into(),
            monitor_id: monitor_id.into(),
            start_time,
            phase: Phase::Dispatch,
            success,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn runner_id(&self) -> &RunnerId {
        &self.runner_id
    }

    pub fn pop(&self) -> &str {
        &self.pop
    }

    pub fn monitor_id(&self) -> &str {
        &self.monitor_id
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Move to `phase` unless the job is already further along.
    ///
    /// Returns the phase the job ends up in.
    pub(crate) fn advance_to(&mut self, phase: Phase) -> Phase {
        if phase > self.phase {
            self.phase = phase;
        }
        self.phase
    }
}

/// Ordered collection of in-flight jobs.
///
/// Order is insertion order; the graph layout keys runner positions on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSet {
    jobs: Vec<CheckJob>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly generated batch.
    pub fn admit(&mut self, batch: impl IntoIterator<Item = CheckJob>) {
        self.jobs.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckJob> {
        self.jobs.iter()
    }

    pub fn as_slice(&self) -> &[CheckJob] {
        &self.jobs
    }

    pub fn get(&self, runner_id: &str) -> Option<&CheckJob> {
        self.jobs.iter().find(|j| j.runner_id.as_str() == runner_id)
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CheckJob> {
        self.jobs.iter_mut()
    }

    /// Remove and return every job in a terminal phase, keeping the rest in
    /// their original order.
    pub(crate) fn take_completed(&mut self) -> Vec<CheckJob> {
        let (completed, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.jobs)
            .into_iter()
            .partition(|j| j.phase.is_terminal());
        self.jobs = live;
        completed
    }
}
