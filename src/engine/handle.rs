// src/engine/handle.rs

//! Control and read surface for a spawned simulation runtime.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::errors::{CheckflowError, Result};

use super::core::SimCore;
use super::runtime::Runtime;
use super::snapshot::Snapshot;
use super::Control;

/// Cloneable handle to a running simulation.
#[derive(Debug, Clone)]
pub struct SimHandle {
    control_tx: mpsc::Sender<Control>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SimHandle {
    pub async fn start(&self) -> Result<()> {
        self.send(Control::Start).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(Control::Stop).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(Control::Reset).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(Control::Shutdown).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    async fn send(&self, control: Control) -> Result<()> {
        self.control_tx
            .send(control)
            .await
            .map_err(|_| CheckflowError::ChannelClosed("control"))
    }
}

/// Spawn the runtime onto the current Tokio runtime.
///
/// The simulation starts stopped; call [`SimHandle::start`] to begin.
pub fn spawn_simulation<C>(core: SimCore, clock: C) -> (SimHandle, JoinHandle<Result<()>>)
where
    C: Clock + 'static,
{
    let (control_tx, control_rx) = mpsc::channel::<Control>(16);
    let (snapshot_tx, snapshot_rx) = watch::channel(core.snapshot());

    let runtime = Runtime::new(core, clock, control_rx, snapshot_tx);
    let join = tokio::spawn(runtime.run());

    let handle = SimHandle {
        control_tx,
        snapshots: snapshot_rx,
    };
    (handle, join)
}
