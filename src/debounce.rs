//! Trailing-edge debouncer over a [`Scheduler`]

use crate::host::Scheduler;
use anyhow::Result;
use std::cell::RefCell;
use std::time::Duration;

/// Runs only the last task submitted within a quiet period
///
/// Owns the pending handle: every `call` cancels it and schedules a
/// replacement, so at most one task is ever pending.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    /// Debouncer with nothing pending
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Debouncer {
            scheduler,
            delay,
            pending: RefCell::new(None),
        }
    }

    /// Quiet period each call waits for
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `task`, due after the delay
    pub fn call(&self, task: impl FnOnce() + 'static) -> Result<()> {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay, Box::new(task))?;
        *self.pending.borrow_mut() = Some(handle);
        Ok(())
    }

    /// Drop the pending task, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for Debouncer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.borrow().is_some())
            .finish()
    }
}
