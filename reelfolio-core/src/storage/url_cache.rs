use std::fmt;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

/// Bounded, expiring memo of derived URLs keyed by `bucket:path:size`.
///
/// Lookups never change a result, they only skip recomputation.
#[derive(Clone)]
pub struct UrlCache {
    inner: Cache<String, String>,
    capacity: u64,
    ttl: Duration,
}

impl fmt::Debug for UrlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl Default for UrlCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }
}

impl UrlCache {
    pub const DEFAULT_CAPACITY: u64 = 4096;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            capacity,
            ttl,
        }
    }

    pub fn key(bucket: &str, path: &str, size: &str) -> String {
        format!("{bucket}:{path}:{size}")
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: String, value: String) {
        self.inner.insert(key, value);
    }

    /// Return the memoized value or compute it. Empty results are not
    /// stored so a later configuration change is picked up.
    pub fn get_or_compute<F>(&self, key: String, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(hit) = self.inner.get(&key) {
            return hit;
        }
        let value = compute();
        if !value.is_empty() {
            debug!(key = %key, "memoizing derived url");
            self.inner.insert(key, value.clone());
        }
        value
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_key() {
        let cache = UrlCache::default();
        let mut calls = 0;
        let key = UrlCache::key("projects", "a/b.jpg", "thumb");
        let first = cache.get_or_compute(key.clone(), || {
            calls += 1;
            "https://x/a".to_string()
        });
        let second = cache.get_or_compute(key, || {
            calls += 1;
            "https://x/other".to_string()
        });
        assert_eq!(first, second);
        assert_eq!(calls, 1);
    }

    #[test]
    fn empty_results_are_not_memoized() {
        let cache = UrlCache::default();
        let key = UrlCache::key("b", "p", "large");
        assert_eq!(cache.get_or_compute(key.clone(), String::new), "");
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn capacity_is_bounded() {
        let cache = UrlCache::new(8, Duration::from_secs(60));
        for i in 0..64 {
            cache.insert(format!("k{i}"), format!("v{i}"));
        }
        assert!(cache.entry_count() <= 8);
    }
}
