//! Read-through caching as an explicit higher-order wrapper.
//!
//! Wraps an aggregate computation so repeated calls with identical
//! arguments inside the TTL window are served from cache. Any store or
//! serialization failure is treated as a miss: the computation runs and its
//! result is returned, so correctness never depends on the cache being up.

use crate::cache::key::{cache_key, namespace_prefix};
use crate::cache::store::CacheStore;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Return the cached result for `(computation, args)` or compute and store it.
///
/// Computation errors propagate to the caller; cache errors never do.
pub fn read_through<T, A, F>(
    store: &dyn CacheStore,
    computation: &str,
    args: &A,
    ttl: Duration,
    compute: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    A: Serialize,
    F: FnOnce() -> Result<T>,
{
    let key = match cache_key(computation, args) {
        Ok(key) => key,
        Err(e) => {
            log::warn!("cache key derivation failed for {computation}: {e}");
            return compute();
        }
    };

    match store.get(&key) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => {
                log::debug!("cache hit for {computation}");
                return Ok(value);
            }
            Err(e) => {
                log::warn!("discarding undecodable cache entry for {computation}: {e}");
            }
        },
        Ok(None) => {
            log::debug!("cache miss for {computation}");
        }
        Err(e) => {
            // Store unreachable: degrade to a pass-through, skip the write too.
            log::warn!("cache read failed for {computation}, computing directly: {e}");
            return compute();
        }
    }

    let value = compute()?;
    store_result(store, computation, &key, ttl, &value);
    Ok(value)
}

/// Serialize and store a computed value; failures are logged, not surfaced.
pub(crate) fn store_result<T: Serialize>(
    store: &dyn CacheStore,
    computation: &str,
    key: &str,
    ttl: Duration,
    value: &T,
) {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            if let Err(e) = store.put(key, &bytes, ttl) {
                log::warn!("cache write failed for {computation}: {e}");
            }
        }
        Err(e) => {
            log::warn!("cache serialization failed for {computation}: {e}");
        }
    }
}

/// Drop every cached entry of one computation. Best-effort bulk delete,
/// not atomic across keys; returns how many entries were removed.
pub fn invalidate_computation(store: &dyn CacheStore, computation: &str) -> usize {
    let prefix = namespace_prefix(computation);
    let keys = match store.keys_with_prefix(&prefix) {
        Ok(keys) => keys,
        Err(e) => {
            log::warn!("cache invalidation scan failed for {computation}: {e}");
            return 0;
        }
    };

    if keys.is_empty() {
        return 0;
    }

    match store.delete(&keys) {
        Ok(count) => {
            log::debug!("invalidated {count} cache entries for {computation}");
            count
        }
        Err(e) => {
            log::warn!("cache invalidation failed for {computation}: {e}");
            0
        }
    }
}
