//! Cancellable scheduled callbacks.
//!
//! The storefront has two delayed actions: simulated order processing and
//! the search suggestion debounce. Both go through [`Timer`], which runs a
//! callback on the tokio runtime after a delay and hands back a
//! [`TimerHandle`] that can cancel it. Timers are not tied to any view; a
//! callback runs unless its handle is cancelled or dropped via
//! [`TimerHandle::cancel_on_drop`].

use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Timer construction errors.
#[derive(Debug, Error)]
pub enum TimerError {
    /// No tokio runtime is running on this thread.
    #[error("no async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Schedules callbacks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct Timer {
    runtime: Handle,
}

impl Timer {
    /// Create a timer that schedules on `runtime`.
    #[must_use]
    pub const fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Create a timer for the runtime this thread is running on.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a tokio runtime.
    pub fn current() -> Result<Self, TimerError> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Run `callback` once `delay` has elapsed.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });

        TimerHandle {
            task,
            cancel_on_drop: false,
        }
    }
}

/// Handle to a scheduled callback.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
    cancel_on_drop: bool,
}

impl TimerHandle {
    /// Cancel the callback if it has not run yet.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the callback has run or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the callback when this handle is dropped.
    #[must_use]
    pub fn cancel_on_drop(mut self) -> Self {
        self.cancel_on_drop = true;
        self
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if self.cancel_on_drop {
            self.task.abort();
        }
    }
}
