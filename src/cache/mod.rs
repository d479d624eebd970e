//! TTL-tiered caching of expensive aggregate computations.
//!
//! Caching here is advisory: every failure path degrades to computing the
//! wrapped result directly, so the application stays correct (if slower)
//! with the store fully unreachable.

pub mod clock;
pub mod key;
pub mod read_through;
pub mod store;
pub mod warming;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{cache_key, namespace_prefix};
pub use read_through::{invalidate_computation, read_through};
pub use store::{CacheError, CacheStore, CounterSnapshot, InMemoryStore, UnreachableStore};
pub use warming::{cache_stats, CacheStats, CacheStatsReport, CacheWarmer, WarmOutcome, WarmupReport};

use serde::{Deserialize, Serialize};

/// Staleness-tolerance class assigned to each cached computation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TtlTier {
    /// Volatile aggregates; seconds of staleness at most.
    RealTime,
    /// Standard dashboard aggregates.
    Standard,
    /// Slow-moving historical metrics.
    Historical,
}

impl std::fmt::Display for TtlTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(TtlTier, &str)] = &[
            (TtlTier::RealTime, "real-time"),
            (TtlTier::Standard, "standard"),
            (TtlTier::Historical, "historical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, s)| *s)
            .unwrap_or("standard");

        write!(f, "{display_str}")
    }
}
