//! Time-boxed response caching.
//!
//! The cache memoizes successful read results by request key for a fixed
//! time-to-live. Entries are never evicted eagerly: a stale entry stays in the
//! map until a later `set` overwrites it or `invalidate` removes it, and a
//! `get` simply recomputes freshness against the clock.
//!
//! # Key Types
//!
//! - [`ResponseCache`] - The keyed store itself
//! - [`CacheEntry`] - A stored payload with its insertion time
//! - [`Clock`] - Time source, swappable for [`ManualClock`] in tests

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, DEFAULT_TTL, ResponseCache};
