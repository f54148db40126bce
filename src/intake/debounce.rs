use std::time::Duration;

use tokio::task::JoinHandle;

/// Identifies one arming of a [`DebounceTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

/// Cancellable single-shot delay. Each `schedule` replaces whatever was
/// pending, so an action only runs after a full quiet period.
///
/// The action runs on a spawned task and usually just posts the token back
/// to the owner's event loop. A fire can already be queued in that channel
/// when a newer `schedule` happens; the owner drops it by checking
/// [`DebounceTimer::claim`].
#[derive(Debug, Default)]
pub struct DebounceTimer {
    handle: Option<JoinHandle<()>>,
    armed: Option<DebounceToken>,
    next: u64,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel anything pending and arm `action` to run after `delay`.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F) -> DebounceToken
    where
        F: FnOnce(DebounceToken) + Send + 'static,
    {
        self.cancel();
        self.next += 1;
        let token = DebounceToken(self.next);
        self.armed = Some(token);
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(token);
        }));
        token
    }

    /// Disarm the timer. Safe to call with nothing pending.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.armed = None;
    }

    /// Accept a fire. True only for the currently armed token, and only once.
    pub fn claim(&mut self, token: DebounceToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            self.handle = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.armed.is_some()
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
