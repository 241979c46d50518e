//! # SWINGSET Action Bus
//!
//! Widget commands do not touch the simulation directly. They post a
//! [`SimAction`] here, and the loop applies everything pending right after
//! the widget pass, before the chain is evaluated.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │   Button /  │─────>│   Action    │─────>│ Simulation  │
//! │  Dropdown   │      │   Channel   │      │    Tick     │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// Something a widget asked the simulation to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimAction {
    /// Rotate the free end by this many radians.
    NudgeAngle(f64),
    /// Replace the gravitational acceleration.
    SetGravity(f64),
    /// Switch angular integration on or off.
    ToggleIntegration,
    /// Put every body back at its configured angle.
    ResetAngles,
    /// Stop the loop after this tick.
    Quit,
}

/// Cloneable producer end, handed to widget commands.
#[derive(Clone, Debug)]
pub struct ActionSender {
    sender: Sender<SimAction>,
}

impl ActionSender {
    /// Posts an action.
    ///
    /// Never blocks. Returns false if the action was dropped because the
    /// queue is full or the simulation is gone.
    pub fn send(&self, action: SimAction) -> bool {
        match self.sender.try_send(action) {
            Ok(()) => true,
            Err(TrySendError::Full(action)) => {
                warn!(?action, "action queue full, dropping action");
                false
            }
            Err(TrySendError::Disconnected(action)) => {
                warn!(?action, "simulation gone, dropping action");
                false
            }
        }
    }
}

/// Bounded action queue owned by the scene.
pub struct ActionBus {
    sender: Sender<SimAction>,
    receiver: Receiver<SimAction>,
}

impl ActionBus {
    /// Creates a new action bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum actions pending between two ticks.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Returns a producer for widget commands.
    #[must_use]
    pub fn sender(&self) -> ActionSender {
        ActionSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every pending action, oldest first.
    pub fn drain(&self) -> Vec<SimAction> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending actions.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}
