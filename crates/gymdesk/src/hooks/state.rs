//! Observable hook state

use crate::error::NormalizedError;

/// Where a hook is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing has run yet, or the state was reset
    #[default]
    Idle,
    /// A call is in flight
    Loading,
    /// The latest call succeeded
    Success,
    /// The latest call failed
    Failed,
}

/// The transient view of a hook: loading, a value, or a message.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    /// A call is in flight
    Loading,
    /// The latest call produced `T`
    Success(T),
    /// The latest call failed with this message
    Error(String),
}

/// State published by a hook.
///
/// `data` survives failures: after a failed refetch it still holds the last
/// successful value, next to the new `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Lifecycle phase
    pub phase: Phase,
    /// Last successful result
    pub data: Option<T>,
    /// Error of the latest call, if it failed
    pub error: Option<NormalizedError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Whether a call is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The state as a [`RequestOutcome`]; `None` while idle.
    pub fn outcome(&self) -> Option<RequestOutcome<&T>> {
        match self.phase {
            Phase::Idle => None,
            Phase::Loading => Some(RequestOutcome::Loading),
            Phase::Success => self.data.as_ref().map(RequestOutcome::Success),
            Phase::Failed => self
                .error
                .as_ref()
                .map(|e| RequestOutcome::Error(e.message.clone())),
        }
    }

    pub(crate) fn begin(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.phase = Phase::Success;
        self.data = Some(data);
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: NormalizedError) {
        self.phase = Phase::Failed;
        self.error = Some(error);
    }
}
