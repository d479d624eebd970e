//! Pure temperature classification over integer scores.

use crate::config::TemperatureThresholds;
use crate::core::Temperature;

/// Map a score to its temperature tier.
///
/// Total over 0..=100 with inclusive boundaries: a score equal to a
/// threshold lands in the hotter tier. No state, no transitions; a lead's
/// temperature only changes through score recomputation.
pub fn classify_temperature(score: u8, thresholds: &TemperatureThresholds) -> Temperature {
    if score >= thresholds.hot {
        Temperature::Hot
    } else if score >= thresholds.warm {
        Temperature::Warm
    } else if score >= thresholds.cool {
        Temperature::Cool
    } else {
        Temperature::Cold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_boundary_grid() {
        let t = TemperatureThresholds::default();
        assert_eq!(classify_temperature(80, &t), Temperature::Hot);
        assert_eq!(classify_temperature(79, &t), Temperature::Warm);
        assert_eq!(classify_temperature(60, &t), Temperature::Warm);
        assert_eq!(classify_temperature(59, &t), Temperature::Cool);
        assert_eq!(classify_temperature(40, &t), Temperature::Cool);
        assert_eq!(classify_temperature(39, &t), Temperature::Cold);
    }

    #[test]
    fn total_over_score_domain() {
        let t = TemperatureThresholds::default();
        for score in 0..=100u8 {
            // Every score maps to exactly one tier; classification is total.
            let tier = classify_temperature(score, &t);
            let expected = match score {
                80..=100 => Temperature::Hot,
                60..=79 => Temperature::Warm,
                40..=59 => Temperature::Cool,
                _ => Temperature::Cold,
            };
            assert_eq!(tier, expected, "score {score}");
        }
    }

    #[test]
    fn custom_thresholds_shift_the_tiers() {
        let t = TemperatureThresholds {
            hot: 90,
            warm: 70,
            cool: 50,
        };
        assert_eq!(classify_temperature(85, &t), Temperature::Warm);
        assert_eq!(classify_temperature(90, &t), Temperature::Hot);
    }
}
