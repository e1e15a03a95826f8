#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the gymdesk client.
//!
//! This crate holds the pieces of the data layer that have nothing to do with
//! HTTP itself and can be tested against a virtual clock:
//!
//! - **Response caching** via [`ResponseCache`](cache::ResponseCache)
//!   - time-boxed entries keyed by request path
//!   - substring invalidation
//!   - injectable [`Clock`](cache::Clock)
//! - **Deadline racing** via [`Deadline`](deadline::Deadline), which pairs an
//!   async call with a timer and drops whichever loses
//! - **Invocation guards** via [`Sequencer`](lifecycle::Sequencer) and
//!   [`Liveness`](lifecycle::Liveness), which keep late results from landing
//! - **Declarative error boundaries** via the `error_boundary!` macro
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use gymdesk_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let cache: ResponseCache<String> = ResponseCache::new();
//! cache.set("/members", "[]".to_string());
//! assert_eq!(cache.get("/members").as_deref(), Some("[]"));
//!
//! let outcome = Deadline::new(Duration::from_secs(15))
//!     .race(async { 42 })
//!     .await;
//! assert_eq!(outcome, Ok(42));
//! # }
//! ```

pub mod cache;
pub mod deadline;
pub mod error;
pub mod lifecycle;

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use gymdesk_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cache::{CacheEntry, Clock, ManualClock, ResponseCache, SystemClock};
    pub use crate::deadline::{Deadline, Elapsed};
    pub use crate::error::ErrorBoundary;
    pub use crate::error_boundary;
    pub use crate::lifecycle::{Liveness, Sequencer, Ticket};
}
