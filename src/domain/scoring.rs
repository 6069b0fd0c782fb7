//! Additive rule scoring for diabetes risk.
//!
//! Each rule awards a fixed number of points when its measurement is
//! strictly above the threshold. The table sums to 100. A total strictly
//! above [`HIGH_RISK_THRESHOLD`] classifies as high risk.
//!
//! NaN never exceeds a threshold, so a NaN field contributes nothing.
//! Callers are expected to have validated the record beforehand.

use super::assessment::{RiskLevel, RuleContribution};
use super::measurement::MeasurementRecord;

/// Scores strictly above this value are [`RiskLevel::High`].
pub const HIGH_RISK_THRESHOLD: u8 = 50;

/// Lower bound of the cosmetic confidence range, in percent.
pub const CONFIDENCE_FLOOR: f64 = 85.0;

/// Upper bound (cap) of the cosmetic confidence range, in percent.
pub const CONFIDENCE_CAP: f64 = 95.0;

/// One row of the rule table.
#[derive(Clone, Copy)]
pub struct ScoringRule {
    pub name: &'static str,
    pub threshold: f64,
    pub points: u8,
    extract: fn(&MeasurementRecord) -> f64,
}

impl ScoringRule {
    /// Points this rule awards for the record (0 or `points`).
    #[must_use]
    pub fn evaluate(&self, record: &MeasurementRecord) -> u8 {
        if (self.extract)(record) > self.threshold {
            self.points
        } else {
            0
        }
    }
}

pub const SCORING_RULES: [ScoringRule; 5] = [
    ScoringRule {
        name: "glucose",
        threshold: 140.0,
        points: 25,
        extract: |m| m.glucose,
    },
    ScoringRule {
        name: "blood_pressure",
        threshold: 80.0,
        points: 15,
        extract: |m| m.blood_pressure,
    },
    ScoringRule {
        name: "bmi",
        threshold: 25.0,
        points: 20,
        extract: |m| m.bmi,
    },
    ScoringRule {
        name: "insulin",
        threshold: 30.0,
        points: 10,
        extract: |m| m.insulin,
    },
    ScoringRule {
        name: "hba1c",
        threshold: 6.5,
        points: 30,
        extract: |m| m.hba1c,
    },
];

const HIGH_RISK_RECOMMENDATIONS: [&str; 3] = [
    "Consult a doctor immediately",
    "Follow strict diet plan",
    "Regular exercise routine",
];

const LOW_RISK_RECOMMENDATIONS: [&str; 3] = [
    "Maintain healthy lifestyle",
    "Regular health checkups",
    "Balanced diet",
];

/// Per-rule breakdown in table order.
#[must_use]
pub fn rule_contributions(record: &MeasurementRecord) -> Vec<RuleContribution> {
    SCORING_RULES
        .iter()
        .map(|rule| RuleContribution {
            rule: rule.name.to_string(),
            points: rule.evaluate(record),
        })
        .collect()
}

/// Sum of awarded points, always within 0-100.
#[must_use]
pub fn risk_score(record: &MeasurementRecord) -> u8 {
    SCORING_RULES.iter().map(|rule| rule.evaluate(record)).sum()
}

/// Strict threshold classification: 50 is LOW, 51 is HIGH.
#[must_use]
pub fn classify(score: u8) -> RiskLevel {
    if score > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

/// Fixed advice list for a risk level.
#[must_use]
pub fn recommendations_for(risk: RiskLevel) -> Vec<String> {
    let list = match risk {
        RiskLevel::High => &HIGH_RISK_RECOMMENDATIONS,
        RiskLevel::Low => &LOW_RISK_RECOMMENDATIONS,
    };
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Map a unit sample `u` in [0, 1) to a confidence percentage.
///
/// `min(85 + u * 10, 95)` rounded to one decimal. Out-of-range samples are
/// clamped so the result always lies in [85.0, 95.0].
#[must_use]
pub fn shape_confidence(u: f64) -> f64 {
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
    let raw = (CONFIDENCE_FLOOR + u * 10.0).min(CONFIDENCE_CAP);
    ((raw * 10.0).round() / 10.0).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(glucose: f64, blood_pressure: f64, bmi: f64, insulin: f64, hba1c: f64) -> MeasurementRecord {
        MeasurementRecord {
            glucose,
            blood_pressure,
            bmi,
            insulin,
            hba1c,
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_table_sums_to_100() {
        let total: u32 = SCORING_RULES.iter().map(|r| u32::from(r.points)).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_high_risk_scenario() {
        let m = record(150.0, 85.0, 30.0, 20.0, 7.0);
        assert_eq!(risk_score(&m), 90);
        assert_eq!(classify(risk_score(&m)), RiskLevel::High);

        let points: Vec<u8> = rule_contributions(&m).iter().map(|c| c.points).collect();
        assert_eq!(points, vec![25, 15, 20, 0, 30]);
    }

    #[test]
    fn test_all_normal_scores_zero() {
        let m = record(90.0, 75.0, 22.0, 10.0, 5.0);
        assert_eq!(risk_score(&m), 0);
        assert_eq!(classify(0), RiskLevel::Low);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // blood pressure exactly 80 does not count
        let m = record(145.0, 80.0, 20.0, 10.0, 5.0);
        assert_eq!(risk_score(&m), 25);
        assert_eq!(classify(25), RiskLevel::Low);

        assert_eq!(risk_score(&record(140.0, 0.0, 0.0, 0.0, 0.0)), 0);
        assert_eq!(risk_score(&record(0.0, 0.0, 25.0, 30.0, 6.5)), 0);
        assert_eq!(risk_score(&record(140.01, 0.0, 0.0, 0.0, 0.0)), 25);
    }

    #[test]
    fn test_all_rules_triggered() {
        let m = record(200.0, 120.0, 35.0, 50.0, 9.0);
        assert_eq!(risk_score(&m), 100);
        assert_eq!(classify(100), RiskLevel::High);
    }

    #[test]
    fn test_classification_boundary() {
        assert_eq!(classify(50), RiskLevel::Low);
        assert_eq!(classify(51), RiskLevel::High);

        // glucose + bmi + blood pressure = 60
        assert_eq!(classify(risk_score(&record(141.0, 81.0, 26.0, 0.0, 0.0))), RiskLevel::High);
        // hba1c + bmi = 50, stays LOW
        assert_eq!(risk_score(&record(0.0, 0.0, 26.0, 0.0, 7.0)), 50);
        assert_eq!(classify(50), RiskLevel::Low);
    }

    #[test]
    fn test_nan_contributes_nothing() {
        let m = record(f64::NAN, f64::NAN, 30.0, f64::NAN, f64::NAN);
        assert_eq!(risk_score(&m), 20);
    }

    #[test]
    fn test_recommendations_by_level() {
        assert_eq!(
            recommendations_for(RiskLevel::High),
            vec![
                "Consult a doctor immediately",
                "Follow strict diet plan",
                "Regular exercise routine"
            ]
        );
        assert_eq!(
            recommendations_for(RiskLevel::Low),
            vec!["Maintain healthy lifestyle", "Regular health checkups", "Balanced diet"]
        );
    }

    #[test]
    fn test_confidence_shaping() {
        assert!((shape_confidence(0.0) - 85.0).abs() < f64::EPSILON);
        assert!((shape_confidence(0.5) - 90.0).abs() < f64::EPSILON);
        assert!((shape_confidence(0.123) - 86.2).abs() < 1e-9);
        assert!((shape_confidence(0.99999) - 95.0).abs() < f64::EPSILON);
        assert!((shape_confidence(7.0) - 95.0).abs() < f64::EPSILON);
        assert!((shape_confidence(f64::NAN) - 85.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_score_is_exact_rule_sum(
            glucose in 0.0f64..400.0,
            bp in 0.0f64..250.0,
            bmi in 0.0f64..70.0,
            insulin in 0.0f64..900.0,
            hba1c in 0.0f64..20.0,
        ) {
            let m = record(glucose, bp, bmi, insulin, hba1c);
            let expected: u8 = if glucose > 140.0 { 25 } else { 0 }
                + if bp > 80.0 { 15 } else { 0 }
                + if bmi > 25.0 { 20 } else { 0 }
                + if insulin > 30.0 { 10 } else { 0 }
                + if hba1c > 6.5 { 30 } else { 0 };

            let score = risk_score(&m);
            prop_assert_eq!(score, expected);
            prop_assert!(score <= 100);
            prop_assert_eq!(classify(score) == RiskLevel::High, score > 50);

            let summed: u8 = rule_contributions(&m).iter().map(|c| c.points).sum();
            prop_assert_eq!(summed, score);
        }

        #[test]
        fn prop_confidence_in_range(u in 0.0f64..1.0) {
            let c = shape_confidence(u);
            prop_assert!((85.0..=95.0).contains(&c));
            prop_assert!(((c * 10.0).round() - c * 10.0).abs() < 1e-6);
        }
    }
}
