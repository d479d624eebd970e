//! Deterministic cache key derivation.
//!
//! A key is the SHA-256 digest of the computation name plus its
//! canonically-serialized arguments. serde_json's object maps are sorted,
//! so identical inputs always produce identical keys regardless of field
//! insertion order - the property the at-most-one-recompute contract under
//! cache miss relies on.

use crate::cache::store::CacheError;
use serde::Serialize;
use sha2::{Digest, Sha256};

const KEY_ROOT: &str = "leadmap";

/// Derive the cache key for a computation applied to `args`.
pub fn cache_key<A: Serialize>(computation: &str, args: &A) -> Result<String, CacheError> {
    let canonical = serde_json::to_value(args)?;

    let mut hasher = Sha256::new();
    hasher.update(computation.as_bytes());
    hasher.update(b":");
    hasher.update(canonical.to_string().as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    Ok(format!("{KEY_ROOT}:{computation}:{digest}"))
}

/// Prefix matching every key of one computation, for pattern invalidation.
pub fn namespace_prefix(computation: &str) -> String {
    format!("{KEY_ROOT}:{computation}:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn identical_inputs_hash_identically() {
        let a = cache_key("lead_stats", &()).unwrap();
        let b = cache_key("lead_stats", &()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_args_hash_differently() {
        let a = cache_key("hot_leads", &10usize).unwrap();
        let b = cache_key("hot_leads", &25usize).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_computations_never_collide_on_prefix() {
        let a = cache_key("lead_stats", &()).unwrap();
        assert!(a.starts_with(&namespace_prefix("lead_stats")));
        assert!(!a.starts_with(&namespace_prefix("hot_leads")));
    }

    #[test]
    fn map_arguments_are_order_independent() {
        let mut forward = HashMap::new();
        forward.insert("window", "month");
        forward.insert("limit", "10");

        let mut reverse = HashMap::new();
        reverse.insert("limit", "10");
        reverse.insert("window", "month");

        assert_eq!(
            cache_key("metrics", &forward).unwrap(),
            cache_key("metrics", &reverse).unwrap()
        );
    }
}
