// src/sim/mod.rs

//! The dispatch-lifecycle simulation itself, free of timers and IO.
//!
//! - [`job`] holds the check job type and the ordered live set.
//! - [`generator`] creates randomized batches of jobs on each tick.
//! - [`lifecycle`] ages jobs, retires finished ones, and folds them into
//!   [`stats`].

pub mod generator;
pub mod job;
pub mod lifecycle;
pub mod stats;

pub use generator::TickGenerator;
pub use job::{CheckJob, JobSet};
pub use lifecycle::{LifecycleStep, PhaseThresholds, PhaseTransition, advance};
pub use stats::Stats;
