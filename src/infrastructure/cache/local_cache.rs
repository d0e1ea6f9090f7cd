//! Per-process link cache, the fastest and most stale tier.

use dashmap::DashMap;

/// Thread-safe in-memory mapping of shortlink id to destination URL.
///
/// Each service instance owns one. Writes are idempotent (an id always maps to the
/// same destination), so concurrent inserts need no ordering. Moderation only clears
/// the entry on the instance that handled the request; other instances keep serving
/// their copy until restarted or flushed.
#[derive(Debug, Default)]
pub struct LocalCache {
    inner: DashMap<String, String>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an id, returning a clone of the destination if present.
    pub fn get(&self, shortlink_id: &str) -> Option<String> {
        self.inner.get(shortlink_id).map(|v| v.value().clone())
    }

    pub fn set(&self, shortlink_id: impl Into<String>, redirect_to: impl Into<String>) {
        self.inner.insert(shortlink_id.into(), redirect_to.into());
    }

    /// Removes an entry. Returns true if one was present.
    pub fn invalidate(&self, shortlink_id: &str) -> bool {
        self.inner.remove(shortlink_id).is_some()
    }

    /// Drops every entry and returns how many were removed.
    pub fn clear(&self) -> usize {
        let count = self.inner.len();
        self.inner.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_then_get() {
        let cache = LocalCache::new();
        cache.set("abc1234", "https://example.com");

        assert_eq!(cache.get("abc1234").as_deref(), Some("https://example.com"));
        assert!(cache.get("zzz9999").is_none());
    }

    #[test]
    fn test_invalidate_reports_presence() {
        let cache = LocalCache::new();
        cache.set("abc1234", "https://example.com");

        assert!(cache.invalidate("abc1234"));
        assert!(!cache.invalidate("abc1234"));
        assert!(cache.get("abc1234").is_none());
    }

    #[test]
    fn test_clear_returns_count() {
        let cache = LocalCache::new();
        cache.set("a", "https://a.com");
        cache.set("b", "https://b.com");

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_writes_same_value() {
        let cache = Arc::new(LocalCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        cache.set("abc1234", "https://example.com");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("abc1234").as_deref(), Some("https://example.com"));
    }
}
