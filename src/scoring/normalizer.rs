//! Feature extraction and normalization.
//!
//! Converts a raw lead record into a fixed set of bounded numeric signals.
//! Missing optional attributes map to a neutral signal rather than
//! propagating nulls into the scorer; the only failure mode is a lead with
//! no contact identity at all.

use crate::config::NormalizationConfig;
use crate::core::Lead;
use crate::errors::LeadmapError;
use serde::{Deserialize, Serialize};

/// Signal used when an optional attribute is absent.
pub const NEUTRAL_SIGNAL: f64 = 0.5;

/// Named, bounded signals extracted from a lead. Each lives in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub property_value: f64,
    pub roof_age: f64,
    pub urgency: f64,
    pub engagement: f64,
}

impl FeatureVector {
    /// Clamp every signal into [0,1]; the scorer applies this before
    /// weighting so adversarial inputs cannot escape the score range.
    pub fn clamped(self) -> Self {
        Self {
            property_value: self.property_value.clamp(0.0, 1.0),
            roof_age: self.roof_age.clamp(0.0, 1.0),
            urgency: self.urgency.clamp(0.0, 1.0),
            engagement: self.engagement.clamp(0.0, 1.0),
        }
    }

    /// All-neutral vector; scores to the documented baseline.
    pub fn neutral() -> Self {
        Self {
            property_value: NEUTRAL_SIGNAL,
            roof_age: NEUTRAL_SIGNAL,
            urgency: NEUTRAL_SIGNAL,
            engagement: NEUTRAL_SIGNAL,
        }
    }
}

/// Extract normalized features from a lead.
///
/// Fails only when the lead has no contact identity (neither phone nor
/// email); every other attribute is optional.
pub fn normalize_lead(
    lead: &Lead,
    config: &NormalizationConfig,
) -> Result<FeatureVector, LeadmapError> {
    if !lead.has_contact_identity() {
        return Err(LeadmapError::validation(
            &lead.id,
            "lead has neither phone nor email",
        ));
    }

    Ok(FeatureVector {
        property_value: normalize_property_value(lead.property_value, config.market_ceiling),
        roof_age: normalize_roof_age(lead.roof_age_years, config.max_roof_life_years),
        urgency: normalize_urgency(lead),
        engagement: normalize_engagement(lead.engagement_events, config.engagement_ceiling),
    })
}

// Pure function: property value against the market ceiling
fn normalize_property_value(value: Option<f64>, ceiling: f64) -> f64 {
    match value {
        Some(v) => (v / ceiling).clamp(0.0, 1.0),
        None => NEUTRAL_SIGNAL,
    }
}

// Pure function: roof age against maximum useful life
fn normalize_roof_age(age: Option<f64>, max_life: f64) -> f64 {
    match age {
        Some(a) => (a / max_life).clamp(0.0, 1.0),
        None => NEUTRAL_SIGNAL,
    }
}

// Pure function: urgency ordinal scale
fn normalize_urgency(lead: &Lead) -> f64 {
    lead.urgency.map(|u| u.signal()).unwrap_or(NEUTRAL_SIGNAL)
}

// Pure function: engagement count clipped to the saturation ceiling.
// A present count of zero is a real (cold) signal, distinct from absent.
fn normalize_engagement(events: Option<u32>, ceiling: u32) -> f64 {
    match events {
        Some(n) => (f64::from(n) / f64::from(ceiling.max(1))).clamp(0.0, 1.0),
        None => NEUTRAL_SIGNAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Urgency;

    fn contactable_lead() -> Lead {
        let mut lead = Lead::new("l-1", "Pat Doe");
        lead.phone = Some("555-0100".to_string());
        lead
    }

    #[test]
    fn documented_scenario_normalizes_as_specified() {
        let mut lead = contactable_lead();
        lead.property_value = Some(600_000.0);
        lead.roof_age_years = Some(18.0);
        lead.urgency = Some(Urgency::Immediate);
        lead.engagement_events = Some(0);

        let features = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert!((features.property_value - 0.8).abs() < 1e-9);
        assert!((features.roof_age - 0.9).abs() < 1e-9);
        assert!((features.urgency - 1.0).abs() < 1e-9);
        assert!((features.engagement - 0.0).abs() < 1e-9);
    }

    #[test]
    fn missing_attributes_default_to_neutral() {
        let lead = contactable_lead();
        let features = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert_eq!(features, FeatureVector::neutral());
    }

    #[test]
    fn values_above_ceiling_saturate() {
        let mut lead = contactable_lead();
        lead.property_value = Some(2_000_000.0);
        lead.roof_age_years = Some(45.0);
        lead.engagement_events = Some(99);

        let features = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert_eq!(features.property_value, 1.0);
        assert_eq!(features.roof_age, 1.0);
        assert_eq!(features.engagement, 1.0);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut lead = contactable_lead();
        lead.property_value = Some(-50_000.0);
        lead.roof_age_years = Some(-3.0);

        let features = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert_eq!(features.property_value, 0.0);
        assert_eq!(features.roof_age, 0.0);
    }

    #[test]
    fn missing_contact_identity_is_a_validation_error() {
        let lead = Lead::new("l-2", "No Contact");
        let err = normalize_lead(&lead, &NormalizationConfig::default()).unwrap_err();
        assert!(matches!(err, LeadmapError::Validation { .. }));
    }

    #[test]
    fn zero_engagement_is_distinct_from_missing() {
        let mut lead = contactable_lead();
        lead.engagement_events = Some(0);
        let present = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert_eq!(present.engagement, 0.0);

        lead.engagement_events = None;
        let absent = normalize_lead(&lead, &NormalizationConfig::default()).unwrap();
        assert_eq!(absent.engagement, NEUTRAL_SIGNAL);
    }
}
