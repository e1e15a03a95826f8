//! Write hook

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use gymdesk_core::deadline::{Deadline, Elapsed};
use gymdesk_core::lifecycle::Liveness;
use tokio::sync::watch;

use super::state::FetchState;
use crate::error::{Error, Result};

type Producer<I, T> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Drives create/update/delete calls and publishes their state.
///
/// A failed [`mutate`](Self::mutate) stores the normalized error and returns
/// the original [`Error`], so form code can branch on it. Nothing is retried
/// and the response cache is left alone; invalidate and refetch from the
/// caller.
pub struct MutationHook<I, T> {
    inner: Arc<MutationInner<I, T>>,
}

struct MutationInner<I, T> {
    producer: Producer<I, T>,
    state: watch::Sender<FetchState<T>>,
    liveness: Liveness,
    deadline: Option<Deadline>,
}

impl<I, T> Clone for MutationHook<I, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, T> std::fmt::Debug for MutationHook<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationHook")
            .field("deadline", &self.inner.deadline)
            .field("alive", &self.inner.liveness.is_alive())
            .finish_non_exhaustive()
    }
}

impl<I, T> MutationHook<I, T>
where
    I: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle hook around `producer`, without a deadline.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::builder(producer).build()
    }

    /// Configure a hook around `producer`.
    pub fn builder<F, Fut>(producer: F) -> MutationHookBuilder<I, T>
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        MutationHookBuilder {
            producer: Arc::new(move |input| -> BoxFuture<'static, Result<T>> {
                Box::pin(producer(input))
            }),
            deadline: None,
            liveness: None,
        }
    }

    /// Run the producer with `input`.
    ///
    /// # Errors
    ///
    /// Returns the producer's error unchanged, or
    /// [`Error::DeadlineExceeded`] when a deadline is configured and fires.
    pub async fn mutate(&self, input: I) -> Result<T> {
        let inner = &self.inner;
        if inner.liveness.is_alive() {
            inner.state.send_modify(FetchState::begin);
        }

        let call = (inner.producer)(input);
        let result = match inner.deadline {
            Some(deadline) => deadline
                .race(call)
                .await
                .unwrap_or_else(|Elapsed(bound)| Err(Error::DeadlineExceeded(bound))),
            None => call.await,
        };

        if !inner.liveness.is_alive() {
            tracing::trace!("Discarding mutation result after teardown");
            return result;
        }

        match &result {
            Ok(data) => {
                let data = data.clone();
                inner.state.send_modify(|state| state.succeed(data));
            }
            Err(error) => {
                let normalized = error.normalize();
                tracing::debug!(kind = ?normalized.kind, error = %error, "Mutation failed");
                inner.state.send_modify(|state| state.fail(normalized));
            }
        }
        result
    }

    /// Clear data and error and go back to `Idle`.
    ///
    /// An in-flight call is not cancelled; its result still lands.
    pub fn reset(&self) {
        self.inner.state.send_replace(FetchState::default());
    }

    /// Stop applying results. Calls still run and still return.
    pub fn teardown(&self) {
        self.inner.liveness.teardown();
    }

    /// The liveness flag this hook checks before applying results.
    pub fn liveness(&self) -> &Liveness {
        &self.inner.liveness
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }
}

/// Builder for [`MutationHook`].
pub struct MutationHookBuilder<I, T> {
    producer: Producer<I, T>,
    deadline: Option<Duration>,
    liveness: Option<Liveness>,
}

impl<I, T> MutationHookBuilder<I, T>
where
    I: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Race every call against `deadline`.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Share `liveness` with other hooks of the same owner.
    pub fn liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = Some(liveness);
        self
    }

    /// Build the hook in the idle state.
    pub fn build(self) -> MutationHook<I, T> {
        let (state, _) = watch::channel(FetchState::default());
        MutationHook {
            inner: Arc::new(MutationInner {
                producer: self.producer,
                state,
                liveness: self.liveness.unwrap_or_default(),
                deadline: self.deadline.map(Deadline::new),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hooks::Phase;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    const TAKEN: &str = r#"{"message":"Email already taken","errors":{"email":["Email already taken"]}}"#;

    fn echo(delay_ms: u64) -> MutationHook<String, String> {
        MutationHook::new(move |name: String| async move {
            sleep(Duration::from_millis(delay_ms)).await;
            if name == "taken" {
                Err(Error::from_response(422, TAKEN))
            } else {
                Ok(format!("created {name}"))
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutate_success_returns_and_stores_data() {
        let hook = echo(5);

        let created = hook.mutate("ana".to_string()).await.unwrap();

        assert_eq!(created, "created ana");
        let state = hook.snapshot();
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.data.as_deref(), Some("created ana"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutate_failure_stores_normalized_and_returns_original() {
        let hook = echo(5);

        let err = hook.mutate("taken".to_string()).await.unwrap_err();

        assert_matches!(err, Error::UnprocessableEntity(ref failure) if failure.status == 422);
        let state = hook.snapshot();
        assert_eq!(state.phase, Phase::Failed);
        assert!(!state.is_loading());
        let error = state.error.unwrap();
        assert_eq!(error.message, "Email already taken");
        assert_eq!(error.kind, ErrorKind::Validation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_state() {
        let hook = echo(5);
        let _ = hook.mutate("taken".to_string()).await;

        hook.reset();

        assert_eq!(hook.snapshot(), FetchState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_after_reset_still_lands() {
        let hook = echo(100);

        let pending = tokio::spawn({
            let hook = hook.clone();
            async move { hook.mutate("ben".to_string()).await }
        });
        sleep(Duration::from_millis(10)).await;
        hook.reset();
        assert_eq!(hook.snapshot().phase, Phase::Idle);

        pending.await.unwrap().unwrap();
        assert_eq!(hook.snapshot().data.as_deref(), Some("created ben"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_discards_result_but_still_returns_it() {
        let hook = echo(100);
        let mut rx = hook.subscribe();

        let pending = tokio::spawn({
            let hook = hook.clone();
            async move { hook.mutate("cy".to_string()).await }
        });
        sleep(Duration::from_millis(10)).await;
        rx.mark_unchanged();
        hook.teardown();

        assert_eq!(pending.await.unwrap().unwrap(), "created cy");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_optional_deadline() {
        let hook: MutationHook<(), u32> = MutationHook::builder(|()| futures::future::pending())
            .deadline(Duration::from_secs(15))
            .build();

        let err = hook.mutate(()).await.unwrap_err();

        assert_matches!(err, Error::DeadlineExceeded(d) if d == Duration::from_secs(15));
        assert_eq!(hook.snapshot().error.unwrap().kind, ErrorKind::Timeout);
    }
}
