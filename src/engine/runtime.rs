// src/engine/runtime.rs

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep, interval_at, sleep};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::errors::Result;

use super::core::SimCore;
use super::snapshot::Snapshot;
use super::{Control, CoreCommand, SimEvent};

/// Pending scheduler pulse timer.
struct PulseTimer {
    seq: u64,
    sleep: Pin<Box<Sleep>>,
}

/// Drives the core simulation from timers and controls, and publishes a
/// [`Snapshot`] after every change.
///
/// This is a thin IO shell around `SimCore`, which contains all the
/// simulation semantics. Every event goes through one `select!` loop on a
/// single task, so the core has exactly one writer and needs no locking.
pub struct Runtime<C: Clock> {
    core: SimCore,
    clock: C,
    control_rx: mpsc::Receiver<Control>,
    snapshot_tx: watch::Sender<Snapshot>,
    generation: Option<Interval>,
    engine: Option<Interval>,
    pulse: Option<PulseTimer>,
}

impl<C: Clock> fmt::Debug for Runtime<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("clock", &self.clock)
            .field("timers_armed", &self.generation.is_some())
            .finish_non_exhaustive()
    }
}

impl<C: Clock> Runtime<C> {
    pub fn new(
        core: SimCore,
        clock: C,
        control_rx: mpsc::Receiver<Control>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) -> Self {
        Self {
            core,
            clock,
            control_rx,
            snapshot_tx,
            generation: None,
            engine: None,
            pulse: None,
        }
    }

    /// Main event loop.
    ///
    /// - Waits on controls, both intervals and the pulse timer.
    /// - Feeds the resulting event into the core.
    /// - Executes commands returned by the core.
    /// - Publishes a snapshot if anything visible changed.
    pub async fn run(mut self) -> Result<()> {
        info!("checkflow runtime started");
        self.publish();

        loop {
            let event = tokio::select! {
                biased;

                control = self.control_rx.recv() => match control {
                    Some(c) => SimEvent::from(c),
                    None => {
                        info!("control channel closed; exiting");
                        break;
                    }
                },
                _ = next_tick(self.generation.as_mut()), if self.generation.is_some() => {
                    SimEvent::GenerationTick
                }
                _ = next_tick(self.engine.as_mut()), if self.engine.is_some() => {
                    SimEvent::EngineStep
                }
                seq = pulse_elapsed(self.pulse.as_mut()), if self.pulse.is_some() => {
                    self.pulse = None;
                    SimEvent::PulseElapsed { seq }
                }
            };

            if !matches!(event, SimEvent::EngineStep) {
                debug!(?event, "runtime received event");
            }

            let now = self.clock.now();
            let step = self.core.step(event, now);

            for command in step.commands {
                self.execute_command(command);
            }

            self.publish();

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::StartTimers => {
                self.generation = Some(periodic(self.core.generation_period()));
                self.engine = Some(periodic(self.core.engine_period()));
            }
            CoreCommand::StopTimers => {
                self.generation = None;
                self.engine = None;
            }
            CoreCommand::ArmPulse { seq, after } => {
                self.pulse = Some(PulseTimer {
                    seq,
                    sleep: Box::pin(sleep(after)),
                });
            }
            CoreCommand::CancelPulse => {
                self.pulse = None;
            }
            CoreCommand::RequestExit => {
                // keep_running=false already ends the loop; nothing else to do.
                info!("core issued RequestExit command");
            }
        }
    }

    fn publish(&self) {
        let next = self.core.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

/// Interval whose first tick is one full period away.
fn periodic(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn next_tick(interval: Option<&mut Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn pulse_elapsed(pulse: Option<&mut PulseTimer>) -> u64 {
    match pulse {
        Some(pulse) => {
            pulse.sleep.as_mut().await;
            pulse.seq
        }
        None => std::future::pending().await,
    }
}
