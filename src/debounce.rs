//! Trailing-edge debouncing for rapid-fire updates.
//!
//! The only consumer in this crate is the free-text search field: each
//! keystroke reschedules the pending filter update, so a burst of edits
//! collapses into a single fetch carrying the final text.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A keyed trailing-edge debouncer.
///
/// `schedule` with a key that already has a pending effect cancels that
/// effect and restarts the timer; the last call within a window wins.
/// Dropping the debouncer (or calling [`Debouncer::cancel_all`]) cancels
/// everything still pending, so no effect outlives its owner.
///
/// The debouncer only delays; it never performs I/O itself.
pub struct Debouncer {
    pending: Mutex<HashMap<&'static str, JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Run `effect` after `delay`, unless the same key is rescheduled first.
    pub fn schedule<E>(&self, key: &'static str, delay: Duration, effect: E)
    where
        E: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            effect();
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.insert(key, handle) {
            previous.abort();
        }
    }

    /// Cancel every pending effect.
    pub fn cancel_all(&self) {
        let mut pending = self.pending.lock().unwrap();
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
