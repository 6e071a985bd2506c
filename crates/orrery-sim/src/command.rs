//! Control-surface commands and the queue that carries them to the frame tick.
//!
//! Input handlers never touch [`SimulationState`] directly. They push
//! [`SimCommand`]s through a [`CommandSender`]; the frame loop drains the
//! [`CommandQueue`] before advancing, so a tick never observes a half-applied
//! change even when commands are produced on another thread.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::warn;

use crate::registry::BodyId;
use crate::state::SimulationState;

/// A single mutation request against the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Set one body's speed multiplier.
    SetSpeed {
        /// Target body.
        body: BodyId,
        /// New multiplier.
        value: f64,
    },
    /// Set the global pause flag.
    SetPaused(bool),
    /// Flip the global pause flag.
    TogglePause,
    /// Fresh phases and unit multipliers for every orbiting body.
    Reset,
    /// Fresh phase and unit multiplier for one body.
    ResetBody(BodyId),
}

/// Cloneable producer handle for [`SimCommand`]s.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<SimCommand>,
}

impl CommandSender {
    /// Enqueue a command. Returns `false` if the queue has been dropped.
    pub fn send(&self, command: SimCommand) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(_)) | Err(TrySendError::Full(_)) => false,
        }
    }
}

/// Consumer side of the command channel, owned by the frame loop.
pub struct CommandQueue {
    tx: Sender<SimCommand>,
    rx: Receiver<SimCommand>,
}

impl CommandQueue {
    /// Create an unbounded queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// A new producer handle.
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Number of commands waiting to be applied.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Apply every queued command in arrival order. Returns how many were
    /// applied successfully; rejected commands are logged and skipped.
    pub fn drain_into(&self, state: &mut SimulationState) -> usize {
        let mut applied = 0;
        for command in self.rx.try_iter() {
            match state.apply(command) {
                Ok(()) => applied += 1,
                Err(e) => warn!("Dropping {command:?}: {e}"),
            }
        }
        applied
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
