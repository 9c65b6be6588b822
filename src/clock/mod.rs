// src/clock/mod.rs

//! Time source for the simulation.
//!
//! Every phase decision in the lifecycle engine is a pure function of
//! `now - start_time`, so the clock is the only thing the engine needs from
//! the outside world. Production code uses [`SystemClock`]; tests use
//! [`mock::ManualClock`] and move time by hand.

use std::fmt::Debug;
use std::ops::Add;
use std::time::Duration;

pub mod mock;

/// An instant on a simulation clock, measured from that clock's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(Duration::from_millis(ms))
    }

    pub fn as_millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }

    /// Time elapsed since `earlier`, or zero if `earlier` is in the future.
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

/// Abstract clock interface.
pub trait Clock: Send + Sync + Debug {
    /// Current instant. No side effects, no caching.
    fn now(&self) -> Timestamp;
}

/// Monotonic clock backed by `tokio::time::Instant`.
///
/// Because it reads tokio's clock, a runtime started with paused time
/// (`#[tokio::test(start_paused = true)]`) moves this clock only when the
/// test advances time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}
