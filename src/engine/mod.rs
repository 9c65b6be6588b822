// src/engine/mod.rs

//! Orchestration engine for the simulation.
//!
//! This module ties together:
//! - the tick generator and lifecycle engine from [`crate::sim`]
//! - the graph projector from [`crate::graph`]
//! - the runtime event loop that reacts to:
//!   - start / stop / reset / shutdown controls
//!   - generation ticks
//!   - engine steps
//!   - scheduler pulse expiry
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`], and [`handle`] is the outside world's view of
//! a running shell.

/// Options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimOptions {
    /// Stop generating after this many ticks and exit once the live set has
    /// drained.
    pub tick_limit: Option<u64>,
}

/// External controls accepted by a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    /// Stop, zero stats and tick count, and rewind job/runner ids.
    Reset,
    Shutdown,
}

/// Events flowing into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Start,
    Stop,
    Reset,
    /// One generation period elapsed.
    GenerationTick,
    /// One engine period elapsed.
    EngineStep,
    /// The pulse timer armed with this sequence number fired.
    PulseElapsed { seq: u64 },
    ShutdownRequested,
}

impl From<Control> for SimEvent {
    fn from(control: Control) -> Self {
        match control {
            Control::Start => SimEvent::Start,
            Control::Stop => SimEvent::Stop,
            Control::Reset => SimEvent::Reset,
            Control::Shutdown => SimEvent::ShutdownRequested,
        }
    }
}

pub mod core;
pub mod event_handlers;
pub mod handle;
pub mod runtime;
pub mod snapshot;

pub use self::core::SimCore;
pub use event_handlers::{CoreCommand, CoreStep};
pub use handle::{SimHandle, spawn_simulation};
pub use runtime::Runtime;
pub use snapshot::Snapshot;
