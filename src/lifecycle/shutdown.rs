//! Shutdown signaling for one start cycle.

use tokio::sync::broadcast;

/// Cancellation signal shared by the accept loop and its connection tasks.
///
/// `stop()` triggers the signal; the accept loop exits and open keep-alive
/// connections finish their in-flight exchange and close. Dispatches that
/// are already running are not cancelled.
#[derive(Debug, Clone)]
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

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
