// src/sim/stats.rs

use serde::Serialize;

use crate::sim::job::CheckJob;

/// Running outcome counters.
///
/// Only [`Stats::fold`] increases them and only [`Stats::reset`] zeroes them,
/// so `total == success + failed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    total: u64,
    success: u64,
    failed: u64,
}

impl Stats {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn success(&self) -> u64 {
        self.success
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// `(total, success, failed)`.
    pub fn as_tuple(&self) -> (u64, u64, u64) {
        (self.total, self.success, self.failed)
    }

    pub fn reset(&mut self) {
        *self = Stats::default();
    }

    /// Count a batch of completed jobs.
    pub fn fold(&mut self, completed: &[CheckJob]) {
        let succeeded = completed.iter().filter(|j| j.success()).count() as u64;
        let total = completed.len() as u64;

        self.total += total;
        self.success += succeeded;
        self.failed += total - succeeded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Timestamp;

    #[test]
    fn fold_splits_by_outcome() {
        let jobs = vec![
            CheckJob::new(0, "SJC", "monitor-0", Timestamp::ZERO, true),
            CheckJob::new(1, "SJC", "monitor-1", Timestamp::ZERO, false),
            CheckJob::new(2, "NRT", "monitor-2", Timestamp::ZERO, true),
        ];

        let mut stats = Stats::default();
        stats.fold(&jobs);
        stats.fold(&[]);
        assert_eq!(stats.as_tuple(), (3, 2, 1));

        stats.reset();
        assert_eq!(stats.as_tuple(), (0, 0, 0));
    }
}
