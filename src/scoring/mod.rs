pub mod normalizer;
pub mod scorer;
pub mod temperature;

pub use normalizer::{normalize_lead, FeatureVector, NEUTRAL_SIGNAL};
pub use scorer::{explain_score, score_features, ScoreBreakdown};
pub use temperature::classify_temperature;
