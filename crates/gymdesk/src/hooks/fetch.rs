//! Read hook with deadline racing and stale-result suppression

use std::collections::hash_map::DefaultHasher;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use gymdesk_core::deadline::{Deadline, Elapsed};
use gymdesk_core::lifecycle::{Liveness, Sequencer};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::FetchState;
use crate::DEFAULT_FETCH_TIMEOUT;
use crate::error::{Error, Result};

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Drives one read operation and publishes its state.
///
/// Every call to [`activate`](Self::activate), [`refetch`](Self::refetch) or
/// a changed [`set_dependencies`](Self::set_dependencies):
///
/// 1. moves to `Loading` and clears the previous error
/// 2. races the producer against the hook's deadline (15s by default)
/// 3. applies the outcome, unless a newer call has started since or the
///    hook was torn down
///
/// Overlapping calls are not deduplicated; only the most recent one lands.
/// Cloning gives another handle to the same hook.
pub struct FetchHook<T> {
    inner: Arc<FetchInner<T>>,
}

struct FetchInner<T> {
    producer: Producer<T>,
    state: watch::Sender<FetchState<T>>,
    sequencer: Sequencer,
    liveness: Liveness,
    deadline: Deadline,
    dependencies: Mutex<Option<u64>>,
}

impl<T> Clone for FetchHook<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for FetchHook<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchHook")
            .field("deadline", &self.inner.deadline)
            .field("alive", &self.inner.liveness.is_alive())
            .finish_non_exhaustive()
    }
}

impl<T> FetchHook<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle hook around `producer` with default options.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::builder(producer).build()
    }

    /// Configure a hook around `producer`.
    pub fn builder<F, Fut>(producer: F) -> FetchHookBuilder<T>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        FetchHookBuilder {
            producer: Arc::new(move || -> BoxFuture<'static, Result<T>> { Box::pin(producer()) }),
            deadline: DEFAULT_FETCH_TIMEOUT,
            liveness: None,
        }
    }

    /// Run the producer for the first time.
    pub async fn activate(&self) {
        self.run().await;
    }

    /// Run the producer again, regardless of dependencies.
    pub async fn refetch(&self) {
        self.run().await;
    }

    /// Run [`refetch`](Self::refetch) on the current runtime without waiting.
    pub fn spawn_refetch(&self) -> JoinHandle<()> {
        let hook = self.clone();
        tokio::spawn(async move { hook.refetch().await })
    }

    /// Declare the values the read depends on.
    ///
    /// The producer runs when the fingerprint of `dependencies` differs from
    /// the last one declared, including on the first call. Returns whether it
    /// ran.
    pub async fn set_dependencies<D: Hash + ?Sized>(&self, dependencies: &D) -> bool {
        let mut hasher = DefaultHasher::new();
        dependencies.hash(&mut hasher);
        let fingerprint = hasher.finish();

        let changed = {
            let mut current = self
                .inner
                .dependencies
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == Some(fingerprint) {
                false
            } else {
                *current = Some(fingerprint);
                true
            }
        };

        if changed {
            self.run().await;
        }
        changed
    }

    /// Stop applying results. Pending and future calls leave the state as is.
    pub fn teardown(&self) {
        self.inner.liveness.teardown();
    }

    /// The liveness flag this hook checks before applying results.
    pub fn liveness(&self) -> &Liveness {
        &self.inner.liveness
    }

    /// The race bound of each call.
    pub fn deadline(&self) -> Duration {
        self.inner.deadline.duration()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    async fn run(&self) {
        let inner = &self.inner;
        if !inner.liveness.is_alive() {
            tracing::trace!("Fetch skipped, hook torn down");
            return;
        }

        let ticket = inner.sequencer.issue();
        inner.state.send_modify(FetchState::begin);

        let outcome = inner.deadline.race((inner.producer)()).await;

        if !inner.liveness.is_alive() {
            tracing::trace!(ticket = ticket.value(), "Discarding fetch result after teardown");
            return;
        }
        if !inner.sequencer.is_current(ticket) {
            tracing::debug!(ticket = ticket.value(), "Discarding stale fetch result");
            return;
        }

        match outcome {
            Ok(Ok(data)) => inner.state.send_modify(|state| state.succeed(data)),
            Ok(Err(error)) => {
                let normalized = error.normalize();
                tracing::debug!(kind = ?normalized.kind, error = %error, "Fetch failed");
                inner.state.send_modify(|state| state.fail(normalized));
            }
            Err(Elapsed(bound)) => {
                tracing::warn!(deadline_ms = bound.as_millis(), "Fetch deadline elapsed");
                let normalized = Error::DeadlineExceeded(bound).normalize();
                inner.state.send_modify(|state| state.fail(normalized));
            }
        }
    }
}

/// Builder for [`FetchHook`].
pub struct FetchHookBuilder<T> {
    producer: Producer<T>,
    deadline: Duration,
    liveness: Option<Liveness>,
}

impl<T> FetchHookBuilder<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bound each call by `deadline` instead of the default.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Share `liveness` with other hooks of the same owner.
    pub fn liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = Some(liveness);
        self
    }

    /// Build the hook in the idle state.
    pub fn build(self) -> FetchHook<T> {
        let (state, _) = watch::channel(FetchState::default());
        FetchHook {
            inner: Arc::new(FetchInner {
                producer: self.producer,
                state,
                sequencer: Sequencer::new(),
                liveness: self.liveness.unwrap_or_default(),
                deadline: Deadline::new(self.deadline),
                dependencies: Mutex::new(None),
            }),
        }
    }
}
