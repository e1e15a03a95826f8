//! Racing an async call against a timer.
//!
//! [`Deadline::race`] starts the timer and the call together and resolves
//! with whichever finishes first. The loser is dropped on the spot: a call
//! that beats the timer cancels the pending sleep, and a timer that fires
//! first drops the call's future so its eventual result can never be seen.

use std::future::Future;
use std::time::Duration;

/// The deadline fired before the raced future completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline of {0:?} elapsed")]
pub struct Elapsed(pub Duration);

/// A fixed time bound for one async call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    duration: Duration,
}

impl Deadline {
    /// Create a deadline of `duration`.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured bound.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Drive `future` to completion unless the deadline passes first.
    ///
    /// The timer is created when this future is first polled and is always
    /// released before `race` returns, whichever side wins.
    pub async fn race<F>(self, future: F) -> Result<F::Output, Elapsed>
    where
        F: Future,
    {
        let timer = tokio::time::sleep(self.duration);
        tokio::pin!(future);
        tokio::pin!(timer);

        tokio::select! {
            biased;

            output = &mut future => Ok(output),
            () = &mut timer => {
                #[cfg(feature = "tracing")]
                tracing::debug!(deadline_ms = self.duration.as_millis(), "Deadline elapsed");
                Err(Elapsed(self.duration))
            }
        }
    }
}
