// src/clock/mock.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Clock, Timestamp};

/// Hand-driven clock for tests.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and pass another into the runtime.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, at: Timestamp) {
        *self.now.lock().unwrap() = at;
    }

    pub fn set_millis(&self, ms: u64) {
        self.set(Timestamp::from_millis(ms));
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(500));
        assert_eq!(other.now(), Timestamp::from_millis(500));

        other.set_millis(42);
        assert_eq!(clock.now(), Timestamp::from_millis(42));
    }
}
