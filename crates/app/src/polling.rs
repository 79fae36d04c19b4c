//! Cancellable poll loops.
//!
//! A loop is a plain future; the caller spawns it on whatever executor the
//! adapter uses. The returned [`PollGuard`] stops the loop when cancelled or
//! dropped, even while a tick is waiting on the network.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, abortable};

use crate::ports::Sleeper;

/// One unit of periodic work.
pub trait PollTask {
    /// Run one poll. Failures are handled (logged) inside the tick.
    fn tick(&self) -> impl Future<Output = ()>;
}

/// When the first tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    /// Tick once right away, then every interval.
    Immediate,
    /// Wait one interval before the first tick.
    AfterInterval,
}

/// Stops its poll loop on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
#[must_use = "dropping the guard cancels the poll loop"]
pub struct PollGuard {
    handle: AbortHandle,
}

impl PollGuard {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Build a loop that runs `task` every `interval` until its guard is cancelled.
///
/// The returned future resolves only after cancellation.
pub fn schedule<S, T>(
    sleeper: S,
    interval: Duration,
    first: FirstTick,
    task: T,
) -> (impl Future<Output = ()>, PollGuard)
where
    S: Sleeper,
    T: PollTask,
{
    let ticks = async move {
        if first == FirstTick::AfterInterval {
            sleeper.sleep(interval).await;
        }
        loop {
            task.tick().await;
            sleeper.sleep(interval).await;
        }
    };
    let (ticks, handle) = abortable(ticks);
    let run = async move {
        if ticks.await.is_err() {
            tracing::debug!("poll loop cancelled");
        }
    };
    (run, PollGuard { handle })
}
