use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use super::clock::{Clock, SystemClock};

/// How long a stored payload counts as fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// A stored payload and the instant it was written.
///
/// Entries are replaced wholesale on every `set`, never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached payload
    pub payload: V,
    /// When the payload was stored
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Whether the entry is still within `ttl` at `now`.
    ///
    /// The boundary is inclusive: an entry exactly `ttl` old is fresh.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) <= ttl
    }
}

/// Keyed, time-boxed store for read results.
///
/// One instance is created at process start and shared (behind an `Arc`) by
/// everything that issues reads. There is no size bound; growth is limited
/// only by the set of distinct keys requested.
///
/// # Examples
///
/// ```rust
/// use gymdesk_core::cache::{ManualClock, ResponseCache};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let cache = ResponseCache::with_clock(Arc::new(clock.clone()));
///
/// cache.set("/members", vec![1, 2, 3]);
/// assert_eq!(cache.get("/members"), Some(vec![1, 2, 3]));
///
/// clock.advance(Duration::from_millis(30_001));
/// assert_eq!(cache.get("/members"), None);
/// ```
pub struct ResponseCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResponseCache<V> {
    /// Create an empty cache on the system clock with the default TTL.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: DEFAULT_TTL,
            clock,
        }
    }

    /// Override the time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Return the payload for `key` if it is still fresh.
    ///
    /// Stale entries are reported as absent but left in place.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        if entry.is_fresh(now, self.ttl) {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "Cache hit");
            Some(entry.payload.clone())
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(key = %key, "Cache entry stale");
            None
        }
    }

    /// Store `payload` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, payload: V) {
        let key = key.into();
        let entry = CacheEntry {
            payload,
            stored_at: self.clock.now(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, "Cached response");

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    /// Remove every key containing `pattern`, or everything when `pattern` is `None`.
    ///
    /// Returns how many entries were removed.
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();

        match pattern {
            Some(pattern) => entries.retain(|key, _| !key.contains(pattern)),
            None => entries.clear(),
        }

        let removed = before - entries.len();

        #[cfg(feature = "tracing")]
        {
            match pattern {
                Some(pattern) => tracing::debug!(pattern = %pattern, removed, "Cleared cache"),
                None => tracing::debug!(removed, "Cleared all cache"),
            }
        }

        removed
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured time-to-live.
    pub fn time_to_live(&self) -> Duration {
        self.ttl
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or_default();
        f.debug_struct("ResponseCache")
            .field("entries", &len)
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use proptest::prelude::*;

    fn cache_with_clock() -> (ResponseCache<String>, ManualClock) {
        let clock = ManualClock::new();
        (ResponseCache::with_clock(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_get_after_set_returns_payload() {
        let (cache, _clock) = cache_with_clock();
        cache.set("/members", "v".to_string());
        assert_eq!(cache.get("/members"), Some("v".to_string()));
    }

    #[test]
    fn test_entry_fresh_at_exact_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.set("/members", "v".to_string());

        clock.advance(Duration::from_millis(30_000));
        assert_eq!(cache.get("/members"), Some("v".to_string()));
    }

    #[test]
    fn test_entry_stale_past_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.set("/members", "v".to_string());

        clock.advance(Duration::from_millis(30_001));
        assert_eq!(cache.get("/members"), None);
        // Stale entries are not evicted eagerly.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_refreshes_stale_entry() {
        let (cache, clock) = cache_with_clock();
        cache.set("/members", "old".to_string());
        clock.advance(Duration::from_secs(45));
        assert_eq!(cache.get("/members"), None);

        cache.set("/members", "new".to_string());
        assert_eq!(cache.get("/members"), Some("new".to_string()));
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let (cache, _clock) = cache_with_clock();
        cache.set("/members", "v1".to_string());
        cache.set("/members", "v2".to_string());

        assert_eq!(cache.get("/members"), Some("v2".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_by_substring() {
        let (cache, _clock) = cache_with_clock();
        cache.set("/members", "a".to_string());
        cache.set("/members/5", "b".to_string());
        cache.set("/payments", "c".to_string());

        let removed = cache.invalidate(Some("members"));

        assert_eq!(removed, 2);
        assert_eq!(cache.get("/members"), None);
        assert_eq!(cache.get("/members/5"), None);
        assert_eq!(cache.get("/payments"), Some("c".to_string()));
    }

    #[test]
    fn test_invalidate_without_pattern_clears_all() {
        let (cache, _clock) = cache_with_clock();
        cache.set("/members", "a".to_string());
        cache.set("/payments?page=2", "b".to_string());

        assert_eq!(cache.invalidate(None), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_query_string_is_part_of_key() {
        let (cache, _clock) = cache_with_clock();
        cache.set("/payments?page=1", "p1".to_string());

        assert_eq!(cache.get("/payments"), None);
        assert_eq!(cache.get("/payments?page=1"), Some("p1".to_string()));
    }

    #[test]
    fn test_custom_ttl() {
        let clock = ManualClock::new();
        let cache = ResponseCache::with_clock(Arc::new(clock.clone())).ttl(Duration::from_secs(1));
        cache.set("/attendance", 7u32);

        clock.advance(Duration::from_millis(1_500));
        assert_eq!(cache.get("/attendance"), None);
        assert_eq!(cache.time_to_live(), Duration::from_secs(1));
    }

    proptest! {
        #[test]
        fn prop_last_writer_wins(writes in proptest::collection::vec((0u8..4, any::<u32>()), 1..64)) {
            let cache = ResponseCache::<u32>::with_clock(Arc::new(ManualClock::new()));
            let mut expected = HashMap::new();

            for (key, value) in &writes {
                let key = format!("/members/{key}");
                cache.set(key.clone(), *value);
                expected.insert(key, *value);
            }

            prop_assert_eq!(cache.len(), expected.len());
            for (key, value) in expected {
                prop_assert_eq!(cache.get(&key), Some(value));
            }
        }
    }
}
