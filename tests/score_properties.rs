//! Property tests for the clamp and totality invariants.

use leadmap::config::{LeadmapConfig, ScoringWeights, TemperatureThresholds};
use leadmap::core::{Lead, Temperature, Urgency};
use leadmap::engine::ScoringEngine;
use leadmap::scoring::{classify_temperature, score_features, FeatureVector};
use proptest::prelude::*;

fn arbitrary_urgency() -> impl Strategy<Value = Option<Urgency>> {
    prop_oneof![
        Just(None),
        Just(Some(Urgency::Exploring)),
        Just(Some(Urgency::WithinQuarter)),
        Just(Some(Urgency::WithinMonth)),
        Just(Some(Urgency::Immediate)),
    ]
}

proptest! {
    /// Scores stay in [0,100] even for adversarial out-of-range features.
    #[test]
    fn score_is_always_in_range(
        property_value in -1e9f64..1e9,
        roof_age in -1e6f64..1e6,
        urgency in -10.0f64..10.0,
        engagement in -10.0f64..10.0,
    ) {
        let features = FeatureVector { property_value, roof_age, urgency, engagement };
        let score = score_features(&features, &ScoringWeights::default());
        prop_assert!(score <= 100);
    }

    /// Every score maps to exactly one tier under any valid thresholds.
    #[test]
    fn classification_is_total(score in 0u8..=100, hot in 3u8..=100) {
        // Derive strictly descending thresholds from the hot cut-off
        let thresholds = TemperatureThresholds {
            hot,
            warm: hot - 1,
            cool: hot - 2,
        };
        prop_assert!(thresholds.validate().is_ok());

        let tier = classify_temperature(score, &thresholds);
        prop_assert!(matches!(
            tier,
            Temperature::Hot | Temperature::Warm | Temperature::Cool | Temperature::Cold
        ));
    }

    /// Classification is monotonic: a higher score never cools down.
    #[test]
    fn classification_is_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let thresholds = TemperatureThresholds::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            classify_temperature(low, &thresholds) <= classify_temperature(high, &thresholds)
        );
    }

    /// Normalization always restores a unit weight sum.
    #[test]
    fn weights_normalize_to_unit_sum(
        property_value in 0.01f64..10.0,
        roof_age in 0.01f64..10.0,
        urgency in 0.01f64..10.0,
        engagement in 0.01f64..10.0,
    ) {
        let mut weights = ScoringWeights { property_value, roof_age, urgency, engagement };
        weights.normalize();
        let sum = weights.property_value + weights.roof_age + weights.urgency + weights.engagement;
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    /// End-to-end: any contactable lead scores in range and classifies.
    #[test]
    fn engine_scores_any_contactable_lead(
        property_value in proptest::option::of(-1e7f64..1e7),
        roof_age in proptest::option::of(-100.0f64..100.0),
        engagement in proptest::option::of(0u32..1000),
        urgency in arbitrary_urgency(),
    ) {
        let mut lead = Lead::new("prop", "Property Test");
        lead.phone = Some("555-0100".to_string());
        lead.property_value = property_value;
        lead.roof_age_years = roof_age;
        lead.engagement_events = engagement;
        lead.urgency = urgency;

        let engine = ScoringEngine::from_config(&LeadmapConfig::default());
        let (score, temperature) = engine.score_lead(&lead).unwrap();
        prop_assert!(score <= 100);
        prop_assert_eq!(
            temperature,
            classify_temperature(score, &TemperatureThresholds::default())
        );
    }
}
