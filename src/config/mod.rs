//! Configuration for the scoring engine and cache layer.
//!
//! Loaded from `.leadmap.toml` discovered in the directory hierarchy; every
//! field has a serde default so a partial (or absent) file yields a working
//! configuration. Weights are validated and normalized at load time so the
//! scorer can assume a unit sum.

mod cache;
mod loader;
mod scoring;
mod thresholds;

pub use cache::CacheConfig;
pub use loader::{load_config, parse_and_validate_config, CONFIG_FILE_NAME};
pub use scoring::{NormalizationConfig, ScoringWeights};
pub use thresholds::TemperatureThresholds;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeadmapConfig {
    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub normalization: NormalizationConfig,

    #[serde(default)]
    pub thresholds: TemperatureThresholds,

    #[serde(default)]
    pub cache: CacheConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_default_config() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, LeadmapConfig::default());
    }
}
