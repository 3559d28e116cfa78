use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Expiry and size limits for a [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    /// Upper bound on stored entries; the entry closest to expiry is evicted first.
    pub max_entries: usize,
}

impl CachePolicy {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
        }
    }
}

/// A thread-safe, last-write-wins cache with TTL and a size bound.
pub struct Cache<V> {
    data: DashMap<String, CacheEntry<V>>,
    policy: CachePolicy,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> Cache<V> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            data: DashMap::new(),
            policy,
        }
    }

    /// Get a live value. Expired entries are dropped on read.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Insert or replace a value with the policy TTL.
    pub fn set(&self, key: String, value: V) {
        self.set_with_ttl(key, value, self.policy.ttl);
    }

    /// Insert or replace a value with a custom TTL.
    pub fn set_with_ttl(&self, key: String, value: V, ttl: Duration) {
        if !self.data.contains_key(&key) && self.data.len() >= self.policy.max_entries {
            self.make_room();
        }
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn make_room(&self) {
        self.cleanup();
        while self.data.len() >= self.policy.max_entries {
            let oldest = self
                .data
                .iter()
                .min_by_key(|entry| entry.expires_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.data.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.data.remove(key).map(|(_, entry)| entry.value)
    }

    /// Remove every entry whose key starts with `prefix`.
    pub fn remove_prefix(&self, prefix: &str) {
        self.data.retain(|k, _| !k.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.data.clear();
    }

    /// Remove all expired entries.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache<V: Clone>(ttl: Duration, max_entries: usize) -> Cache<V> {
        Cache::new(CachePolicy::new(ttl, max_entries))
    }

    #[test]
    fn test_cache_basic() {
        let cache = cache(Duration::from_secs(60), 10);
        cache.set("PETR4".to_string(), 1);
        assert_eq!(cache.get("PETR4"), Some(1));
        assert_eq!(cache.get("VALE3"), None);
    }

    #[test]
    fn test_cache_expiration() {
        let cache = cache(Duration::from_millis(10), 10);
        cache.set("PETR4".to_string(), 1);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("PETR4"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_entry_closest_to_expiry() {
        let cache = cache(Duration::from_secs(60), 2);
        cache.set_with_ttl("a".to_string(), 1, Duration::from_secs(5));
        cache.set_with_ttl("b".to_string(), 2, Duration::from_secs(50));
        cache.set("c".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_cache_overwrite_does_not_evict() {
        let cache = cache(Duration::from_secs(60), 2);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.set("b".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(3));
    }

    #[test]
    fn test_cache_prefers_dropping_expired_entries() {
        let cache = cache(Duration::from_secs(60), 2);
        cache.set_with_ttl("stale".to_string(), 1, Duration::from_millis(5));
        cache.set("live".to_string(), 2);
        std::thread::sleep(Duration::from_millis(15));
        cache.set("new".to_string(), 3);

        assert_eq!(cache.get("live"), Some(2));
        assert_eq!(cache.get("new"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_remove_prefix() {
        let cache = cache(Duration::from_secs(60), 10);
        cache.set("PETR4|3mo|1d".to_string(), 1);
        cache.set("PETR4|1mo|1d".to_string(), 2);
        cache.set("VALE3|3mo|1d".to_string(), 3);
        cache.remove_prefix("PETR4|");

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("VALE3|3mo|1d"), Some(3));
    }

    #[test]
    fn test_cache_zero_size_is_clamped() {
        let policy = CachePolicy::new(Duration::from_secs(1), 0);
        assert_eq!(policy.max_entries, 1);
    }
}
