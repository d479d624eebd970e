//! Cache store contract and the bundled in-memory backend.
//!
//! The engine talks to the cache through the narrow `CacheStore` trait;
//! a Redis-style external store slots in behind the same contract. Errors
//! from any store never leave the cache layer - callers degrade to direct
//! computation instead.

use crate::cache::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Cache-layer error. Internal to the cache module boundary by design.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Store connectivity/timeout failure; callers fall back to computing.
    #[error("cache store unreachable: {0}")]
    Unavailable(String),

    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Hit/miss counter snapshot read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub hits: u64,
    pub misses: u64,
}

impl CounterSnapshot {
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Narrow get/set/invalidate contract over the shared cache store.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;
    /// Best-effort bulk delete; returns how many keys were removed.
    fn delete(&self, keys: &[String]) -> Result<usize, CacheError>;
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError>;
    /// Connectivity probe.
    fn ping(&self) -> Result<(), CacheError>;
    fn counters(&self) -> Result<CounterSnapshot, CacheError>;
}

#[derive(Clone, Debug)]
struct StoredEntry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Bundled in-memory backend with per-entry TTL and lazy expiry.
pub struct InMemoryStore {
    entries: RwLock<im::HashMap<String, StoredEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entries", &self.entries.read().len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(im::HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            clock,
        }
    }

    /// Live entry count (expired entries may linger until next read).
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn drop_entry(&self, key: &str) {
        let mut entries = self.entries.write();
        let next = entries.without(key);
        *entries = next;
    }
}

impl CacheStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entry = self.entries.read().get(key).cloned();
        match entry {
            Some(e) if e.is_expired(self.clock.now()) => {
                self.drop_entry(key);
                self.record_miss();
                Ok(None)
            }
            Some(e) => {
                self.record_hit();
                Ok(Some(e.value))
            }
            None => {
                self.record_miss();
                Ok(None)
            }
        }
    }

    fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        // Out-of-range std durations saturate to an effectively-infinite TTL
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500));
        let entry = StoredEntry {
            value: value.to_vec(),
            expires_at: self.clock.now() + ttl,
        };
        let mut entries = self.entries.write();
        let next = entries.update(key.to_string(), entry);
        *entries = next;
        Ok(())
    }

    fn delete(&self, keys: &[String]) -> Result<usize, CacheError> {
        let mut entries = self.entries.write();
        let mut removed = 0;
        let mut next = entries.clone();
        for key in keys {
            if next.contains_key(key) {
                next = next.without(key);
                removed += 1;
            }
        }
        *entries = next;
        Ok(removed)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .entries
            .read()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn counters(&self) -> Result<CounterSnapshot, CacheError> {
        Ok(CounterSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }
}

/// Store double simulating an offline backend; every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachableStore;

impl UnreachableStore {
    fn unavailable<T>() -> Result<T, CacheError> {
        Err(CacheError::Unavailable("cache store offline".to_string()))
    }
}

impl CacheStore for UnreachableStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Self::unavailable()
    }

    fn put(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
        Self::unavailable()
    }

    fn delete(&self, _keys: &[String]) -> Result<usize, CacheError> {
        Self::unavailable()
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, CacheError> {
        Self::unavailable()
    }

    fn ping(&self) -> Result<(), CacheError> {
        Self::unavailable()
    }

    fn counters(&self) -> Result<CounterSnapshot, CacheError> {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;

    fn manual_store() -> (Arc<ManualClock>, InMemoryStore) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = InMemoryStore::with_clock(clock.clone());
        (clock, store)
    }

    #[test]
    fn put_then_get_round_trips() {
        let (_clock, store) = manual_store();
        store
            .put("k1", b"payload", Duration::from_secs(30))
            .unwrap();
        assert_eq!(store.get("k1").unwrap(), Some(b"payload".to_vec()));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let (clock, store) = manual_store();
        store.put("k1", b"payload", Duration::from_secs(30)).unwrap();

        clock.advance(chrono::Duration::seconds(29));
        assert!(store.get("k1").unwrap().is_some());

        clock.advance(chrono::Duration::seconds(1));
        assert!(store.get("k1").unwrap().is_none());
        // Expired entry was dropped lazily
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn counters_track_hits_and_misses() {
        let (_clock, store) = manual_store();
        store.put("k1", b"v", Duration::from_secs(30)).unwrap();

        store.get("k1").unwrap();
        store.get("k1").unwrap();
        store.get("absent").unwrap();

        let counters = store.counters().unwrap();
        assert_eq!(counters.hits, 2);
        assert_eq!(counters.misses, 1);
        assert_eq!(counters.total(), 3);
        assert!((counters.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overwrite_refreshes_value_and_ttl() {
        let (clock, store) = manual_store();
        store.put("k1", b"old", Duration::from_secs(30)).unwrap();
        clock.advance(chrono::Duration::seconds(20));

        store.put("k1", b"new", Duration::from_secs(30)).unwrap();
        clock.advance(chrono::Duration::seconds(20));

        assert_eq!(store.get("k1").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn delete_returns_removed_count() {
        let (_clock, store) = manual_store();
        store.put("a", b"1", Duration::from_secs(30)).unwrap();
        store.put("b", b"2", Duration::from_secs(30)).unwrap();

        let keys = vec!["a".to_string(), "b".to_string(), "missing".to_string()];
        assert_eq!(store.delete(&keys).unwrap(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn prefix_scan_matches_namespaces() {
        let (_clock, store) = manual_store();
        store.put("leadmap:stats:abc", b"1", Duration::from_secs(30)).unwrap();
        store.put("leadmap:stats:def", b"2", Duration::from_secs(30)).unwrap();
        store.put("leadmap:hot:xyz", b"3", Duration::from_secs(30)).unwrap();

        let mut keys = store.keys_with_prefix("leadmap:stats:").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["leadmap:stats:abc", "leadmap:stats:def"]);
    }

    #[test]
    fn unreachable_store_fails_every_operation() {
        let store = UnreachableStore;
        assert!(store.get("k").is_err());
        assert!(store.put("k", b"v", Duration::from_secs(1)).is_err());
        assert!(store.ping().is_err());
        assert!(store.counters().is_err());
    }

    #[test]
    fn hit_rate_is_zero_with_no_requests() {
        let snapshot = CounterSnapshot { hits: 0, misses: 0 };
        assert_eq!(snapshot.hit_rate(), 0.0);
    }
}
