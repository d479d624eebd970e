//! Scoring configuration: feature weights and normalization ceilings.
//!
//! Weights follow the weighted-sum model: each normalized feature contributes
//! `weight * value * 100` points and the weights must sum to 1.0. Ceilings
//! bound the raw attributes before they enter the scorer.

use serde::{Deserialize, Serialize};

/// Scoring weights configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Weight for the property value factor (0.0-1.0)
    #[serde(default = "default_property_value_weight")]
    pub property_value: f64,

    /// Weight for the roof age factor (0.0-1.0)
    #[serde(default = "default_roof_age_weight")]
    pub roof_age: f64,

    /// Weight for the urgency factor (0.0-1.0)
    #[serde(default = "default_urgency_weight")]
    pub urgency: f64,

    /// Weight for the referral/engagement factor (0.0-1.0)
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            property_value: default_property_value_weight(),
            roof_age: default_roof_age_weight(),
            urgency: default_urgency_weight(),
            engagement: default_engagement_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    fn sum(&self) -> f64 {
        self.property_value + self.roof_age + self.urgency + self.engagement
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Scoring weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }

        for validation in [
            Self::validate_weight(self.property_value, "Property value"),
            Self::validate_weight(self.roof_age, "Roof age"),
            Self::validate_weight(self.urgency, "Urgency"),
            Self::validate_weight(self.engagement, "Engagement"),
        ] {
            validation?;
        }

        Ok(())
    }

    /// Normalize weights to ensure they sum to exactly 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > f64::EPSILON {
            self.property_value /= sum;
            self.roof_age /= sum;
            self.urgency /= sum;
            self.engagement /= sum;
        }
    }
}

// Default weights for the weighted-sum model - equal contribution per signal
pub fn default_property_value_weight() -> f64 {
    0.25
}
pub fn default_roof_age_weight() -> f64 {
    0.25
}
pub fn default_urgency_weight() -> f64 {
    0.25
}
pub fn default_engagement_weight() -> f64 {
    0.25
}

/// Ceilings used to normalize raw lead attributes into [0,1] signals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizationConfig {
    /// Market ceiling for property value; values at or above map to 1.0.
    #[serde(default = "default_market_ceiling")]
    pub market_ceiling: f64,

    /// Maximum useful roof life in years; ages at or above map to 1.0.
    #[serde(default = "default_max_roof_life_years")]
    pub max_roof_life_years: f64,

    /// Engagement event count at which the signal saturates to 1.0.
    #[serde(default = "default_engagement_ceiling")]
    pub engagement_ceiling: u32,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            market_ceiling: default_market_ceiling(),
            max_roof_life_years: default_max_roof_life_years(),
            engagement_ceiling: default_engagement_ceiling(),
        }
    }
}

impl NormalizationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.market_ceiling <= 0.0 {
            return Err("market_ceiling must be positive".to_string());
        }
        if self.max_roof_life_years <= 0.0 {
            return Err("max_roof_life_years must be positive".to_string());
        }
        if self.engagement_ceiling == 0 {
            return Err("engagement_ceiling must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_market_ceiling() -> f64 {
    750_000.0
}
fn default_max_roof_life_years() -> f64 {
    20.0
}
fn default_engagement_ceiling() -> u32 {
    10
}
