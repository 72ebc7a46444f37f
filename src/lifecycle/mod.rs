//! Lifecycle coordination.
//!
//! The controller spawns two background tasks; both subscribe to one
//! [`Shutdown`] coordinator and stop when it fires. No task blocks
//! forever: a producer stuck on a full queue races the enqueue against
//! the shutdown signal.

use tokio::sync::broadcast;

/// Coordinator for stopping the controller's background tasks.
///
/// Wraps a broadcast channel so any number of tasks can wait for one
/// trigger.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Idempotent; tasks that already stopped are not
    /// affected.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
