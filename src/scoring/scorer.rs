//! Deterministic weighted-sum scorer.
//!
//! Maps a normalized feature vector to an integer score in [0,100]. Pure,
//! no I/O; identical inputs always produce identical scores.

use crate::config::ScoringWeights;
use crate::scoring::normalizer::FeatureVector;
use serde::Serialize;

/// Combine normalized features into one integer score.
///
/// Each feature contributes `weight * value * 100` points; the sum is
/// rounded half-away-from-zero and clamped to [0,100]. Out-of-range
/// features are clamped before weighting rather than rejected.
pub fn score_features(features: &FeatureVector, weights: &ScoringWeights) -> u8 {
    let f = features.clamped();
    let weighted = weights.property_value * f.property_value
        + weights.roof_age * f.roof_age
        + weights.urgency * f.urgency
        + weights.engagement * f.engagement;

    (weighted * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Per-feature contribution breakdown for verbose score explanations.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub features: FeatureVector,
    pub contributions: Vec<FeatureContribution>,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureContribution {
    pub name: &'static str,
    pub signal: f64,
    pub weight: f64,
    /// Points this feature added to the final score.
    pub points: f64,
}

/// Expand a scoring decision into its per-feature contributions.
pub fn explain_score(features: &FeatureVector, weights: &ScoringWeights) -> ScoreBreakdown {
    let f = features.clamped();
    let contributions = vec![
        contribution("property_value", f.property_value, weights.property_value),
        contribution("roof_age", f.roof_age, weights.roof_age),
        contribution("urgency", f.urgency, weights.urgency),
        contribution("engagement", f.engagement, weights.engagement),
    ];

    ScoreBreakdown {
        features: f,
        contributions,
        score: score_features(features, weights),
    }
}

fn contribution(name: &'static str, signal: f64, weight: f64) -> FeatureContribution {
    FeatureContribution {
        name,
        signal,
        weight,
        points: weight * signal * 100.0,
    }
}
