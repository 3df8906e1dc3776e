//! Debounced invocation of an async action
//!
//! A `Debouncer` owns at most one scheduled timer. Every `trigger` cancels the
//! timer that has not fired yet and schedules a new one, so a burst of calls
//! collapses into a single invocation carrying the last input once the delay
//! has passed without further triggers.
//!
//! Cancellation only reaches the timer. Once the delay has elapsed the action
//! is called from the timer task and the future it returns is spawned as its
//! own task, so later triggers never abort it.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::task::JoinHandle;
use tracing::trace;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Coalesces rapid `trigger` calls into one delayed action.
///
/// Must be triggered from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |input| action(input).boxed()),
            pending: None,
        }
    }

    /// Schedule the action with `input`, replacing any unfired timer.
    ///
    /// Returns `true` when a pending invocation was superseded.
    pub fn trigger(&mut self, input: T) -> bool {
        let superseded = self.cancel();
        let action = Arc::clone(&self.action);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action(input));
        }));

        trace!(delay_ms = delay.as_millis() as u64, superseded, "debounce timer scheduled");
        superseded
    }

    /// Drop the pending timer, if any. Returns `true` if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl<T> Debouncer<T> {
    /// Whether a timer is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
