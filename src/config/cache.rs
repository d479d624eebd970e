use crate::cache::TtlTier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Expiration classes for cached aggregate computations.
///
/// Each cached computation is assigned one of three tiers based on its
/// staleness tolerance; the tier's TTL is applied at write time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for volatile aggregates like the hot-leads list.
    #[serde(default = "default_realtime_ttl_secs")]
    pub realtime_ttl_secs: u64,

    /// TTL for standard aggregates like lead statistics.
    #[serde(default = "default_standard_ttl_secs")]
    pub standard_ttl_secs: u64,

    /// TTL for slow-moving historical metrics.
    #[serde(default = "default_historical_ttl_secs")]
    pub historical_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            realtime_ttl_secs: default_realtime_ttl_secs(),
            standard_ttl_secs: default_standard_ttl_secs(),
            historical_ttl_secs: default_historical_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl_for(&self, tier: TtlTier) -> Duration {
        let secs = match tier {
            TtlTier::RealTime => self.realtime_ttl_secs,
            TtlTier::Standard => self.standard_ttl_secs,
            TtlTier::Historical => self.historical_ttl_secs,
        };
        Duration::from_secs(secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.realtime_ttl_secs == 0 || self.standard_ttl_secs == 0 || self.historical_ttl_secs == 0
        {
            return Err("cache TTLs must be positive".to_string());
        }
        Ok(())
    }
}

fn default_realtime_ttl_secs() -> u64 {
    30
}
fn default_standard_ttl_secs() -> u64 {
    300
}
fn default_historical_ttl_secs() -> u64 {
    3600
}
