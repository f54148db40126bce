use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Dashboard-wide change counter. Mutations bump it; widgets that derive
/// their own data from the backend watch it and refetch on any change.
#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        RefreshCoordinator { tx: Arc::new(tx) }
    }

    /// Increment the counter and notify subscribers
    pub fn bump(&self) -> u64 {
        let mut value = 0;
        self.tx.send_modify(|counter| {
            *counter += 1;
            value = *counter;
        });
        debug!(counter = value, "refresh bumped");
        value
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}
