//! Invocation guards for async state holders.
//!
//! Anything that starts async work and later writes the result into shared
//! state needs two checks before the write:
//!
//! - is this the most recent invocation? ([`Sequencer`] / [`Ticket`])
//! - is the owner still around? ([`Liveness`])
//!
//! Both are lock-free and cheap to clone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof of one issued invocation, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonically increasing invocation counter.
///
/// Every call to [`issue`](Self::issue) supersedes all previous tickets.
///
/// ```rust
/// use gymdesk_core::lifecycle::Sequencer;
///
/// let seq = Sequencer::new();
/// let first = seq.issue();
/// let second = seq.issue();
/// assert!(!seq.is_current(first));
/// assert!(seq.is_current(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: Arc<AtomicU64>,
}

impl Sequencer {
    /// Create a counter with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is the latest one issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// Shared flag marking whether an owner is still active.
///
/// Clones observe the same flag. Once torn down, a `Liveness` never comes
/// back; owners that remount create a fresh one.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    /// Create a live flag.
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the owner is still active.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the owner as gone. Idempotent.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
