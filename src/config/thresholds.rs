use serde::{Deserialize, Serialize};

/// Score cut-offs mapping a 0-100 lead score to a temperature tier.
///
/// Boundaries are inclusive: a score equal to `hot` classifies as hot.
/// Thresholds are injected configuration so sales teams can retune tiers
/// without touching the scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemperatureThresholds {
    #[serde(default = "default_hot_threshold")]
    pub hot: u8,

    #[serde(default = "default_warm_threshold")]
    pub warm: u8,

    #[serde(default = "default_cool_threshold")]
    pub cool: u8,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            hot: default_hot_threshold(),
            warm: default_warm_threshold(),
            cool: default_cool_threshold(),
        }
    }
}

impl TemperatureThresholds {
    /// Aggressive tiers surface more leads as hot for high-capacity crews.
    pub fn aggressive() -> Self {
        Self {
            hot: 70,
            warm: 50,
            cool: 30,
        }
    }

    /// Balanced tiers (default).
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Conservative tiers keep the hot list short during busy season.
    pub fn conservative() -> Self {
        Self {
            hot: 88,
            warm: 70,
            cool: 50,
        }
    }

    /// Thresholds must be strictly descending and at most 100.
    pub fn validate(&self) -> Result<(), String> {
        if self.hot > 100 {
            return Err(format!("hot threshold {} exceeds 100", self.hot));
        }
        if self.hot <= self.warm || self.warm <= self.cool {
            return Err(format!(
                "temperature thresholds must be strictly descending: hot {} > warm {} > cool {}",
                self.hot, self.warm, self.cool
            ));
        }
        Ok(())
    }
}

fn default_hot_threshold() -> u8 {
    80
}
fn default_warm_threshold() -> u8 {
    60
}
fn default_cool_threshold() -> u8 {
    40
}
