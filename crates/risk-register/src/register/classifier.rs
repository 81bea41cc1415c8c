//! Probability x impact scoring.
//!
//! Thresholds use strict greater-than and are checked from the most severe level down,
//! so a score sitting exactly on a boundary lands in the lower bucket.

use serde::Serialize;

use super::domain::RiskLevel;

pub const CRITICAL_ABOVE: f64 = 20.0;
pub const HIGH_ABOVE: f64 = 10.0;
pub const MEDIUM_ABOVE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub score: f64,
    pub level: RiskLevel,
}

impl Classification {
    pub fn for_record(probability: u8, impact: u8) -> Self {
        classify(f64::from(probability), f64::from(impact))
    }
}

/// Scores and buckets a pair of inputs. Total: any input, including NaN, yields a level.
pub fn classify(probability: f64, impact: f64) -> Classification {
    let score = probability * impact;
    let level = if score > CRITICAL_ABOVE {
        RiskLevel::Critical
    } else if score > HIGH_ABOVE {
        RiskLevel::High
    } else if score > MEDIUM_ABOVE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Classification { score, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_table_holds() {
        let cases = [
            (1.0, 1.0, 1.0, RiskLevel::Low),
            (1.0, 4.0, 4.0, RiskLevel::Low),
            (1.0, 5.0, 5.0, RiskLevel::Medium),
            (2.0, 5.0, 10.0, RiskLevel::Medium),
            (3.0, 4.0, 12.0, RiskLevel::High),
            (4.0, 5.0, 20.0, RiskLevel::High),
            (5.0, 5.0, 25.0, RiskLevel::Critical),
        ];

        for (probability, impact, score, level) in cases {
            let result = classify(probability, impact);
            assert_eq!(result.score, score, "score for {probability}x{impact}");
            assert_eq!(result.level, level, "level for {probability}x{impact}");
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        for probability in 1..=5u8 {
            for impact in 1..=5u8 {
                let first = Classification::for_record(probability, impact);
                let second = Classification::for_record(probability, impact);
                assert_eq!(first, second);
                assert_eq!(first.score, f64::from(probability * impact));
            }
        }
    }

    #[test]
    fn raising_probability_never_lowers_level() {
        for impact in 1..=5u8 {
            let mut previous = RiskLevel::Low;
            for probability in 1..=5u8 {
                let level = Classification::for_record(probability, impact).level;
                assert!(
                    level >= previous,
                    "level dropped at probability {probability}, impact {impact}"
                );
                previous = level;
            }
        }
    }

    #[test]
    fn out_of_scale_inputs_still_classify() {
        assert_eq!(classify(0.0, 5.0).level, RiskLevel::Low);
        assert_eq!(classify(-3.0, 4.0).level, RiskLevel::Low);
        assert_eq!(classify(10.0, 10.0).level, RiskLevel::Critical);
        assert_eq!(classify(2.5, 2.0).level, RiskLevel::Medium);
        assert_eq!(classify(f64::NAN, 3.0).level, RiskLevel::Low);
    }
}
