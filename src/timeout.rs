//! Timeout service (C4): schedule a one-shot callback after N ms on the
//! event loop, cancellable.
//!
//! Realized as a `tokio::task::spawn_local` task that sleeps then runs
//! the callback; `TimeoutHandle` aborts the task on drop, which is the
//! tokio-idiomatic reading of "destruction of the scope before firing
//! cancels the callback" from the spec's resource-scope discipline.

use std::time::Duration;

/// A scoped, cancellable timeout. Dropping it (or calling `cancel`
/// explicitly) guarantees the callback never runs afterward.
pub struct TimeoutHandle {
    task: tokio::task::JoinHandle<()>,
}

impl TimeoutHandle {
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Schedules `on_fire` to run once, `millis` from now, on the current
/// `LocalSet`. The callback runs at most once; it never runs if the
/// returned handle is dropped or cancelled first.
pub fn set_timeout<F>(millis: u64, on_fire: F) -> TimeoutHandle
where
    F: FnOnce() + 'static,
{
    let task = tokio::task::spawn_local(async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        on_fire();
    });
    TimeoutHandle { task }
}
