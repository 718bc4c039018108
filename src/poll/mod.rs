//! Deadline-bounded polling for asynchronous provider state transitions.
//!
//! Lifecycle operations such as stop, clone, backup, and restore return
//! before the remote resource reaches its terminal state. The [`Poller`]
//! turns them into synchronous waits: it repeatedly invokes a resource
//! accessor until a caller-supplied predicate holds, the resource
//! disappears, or the deadline elapses. The loop is guaranteed to finish
//! within `deadline + interval` plus one fetch latency.

#[cfg(test)]
mod tests;

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::UpCloudError;

/// Smallest accepted delay between poll attempts. A zero interval would
/// flood the remote API, so intervals below this floor are clamped up.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Terminal outcome of a poll loop. Exactly one variant holds at loop
/// exit.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum PollOutcome<S> {
    /// The predicate held; carries the snapshot it held on.
    Reached(S),
    /// The accessor signalled that the resource no longer exists.
    Disappeared,
    /// The deadline elapsed before either of the above.
    TimedOut,
}

impl<S> PollOutcome<S> {
    /// Returns `true` when the predicate was satisfied.
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::Reached(_))
    }

    /// Unwraps the snapshot when the predicate was satisfied.
    pub fn reached(self) -> Option<S> {
        match self {
            Self::Reached(snapshot) => Some(snapshot),
            Self::Disappeared | Self::TimedOut => None,
        }
    }
}

/// Deadline-bounded poll loop over a resource accessor.
///
/// Cancellation is drop-based: the future returned by [`Poller::run`] can
/// be raced against any other future (for example with `tokio::select!`)
/// and abandons the wait at its next sleep point when dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Poller {
    deadline: Duration,
    interval: Duration,
}

impl Poller {
    /// Creates a poller with the given total deadline and per-attempt
    /// delay. Intervals below [`MIN_POLL_INTERVAL`] are clamped up.
    #[must_use]
    pub fn new(deadline: Duration, interval: Duration) -> Self {
        Self {
            deadline,
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Polls `fetch` until `predicate` holds on a snapshot, the resource
    /// disappears, or the deadline elapses.
    ///
    /// The first fetch happens before any sleep, so an immediately
    /// satisfied predicate or an already-deleted resource returns without
    /// delay. Transient fetch errors are treated as "condition not yet
    /// satisfied" and retried until the same deadline; they never abort
    /// the loop.
    pub async fn run<S, F, Fut, P>(&self, mut fetch: F, predicate: P) -> PollOutcome<S>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<S>, UpCloudError>>,
        P: Fn(&S) -> bool,
    {
        let deadline = Instant::now() + self.deadline;
        loop {
            match fetch().await {
                Ok(None) => return PollOutcome::Disappeared,
                Ok(Some(snapshot)) => {
                    if predicate(&snapshot) {
                        return PollOutcome::Reached(snapshot);
                    }
                    debug!("poll condition not yet satisfied");
                }
                Err(err) => debug!(error = %err, "transient fetch failure during poll"),
            }
            if Instant::now() >= deadline {
                warn!("poll deadline elapsed");
                return PollOutcome::TimedOut;
            }
            sleep(self.interval).await;
        }
    }
}
