//! Rule-based adapter: Implementation of RiskEngine.
//!
//! Applies the additive rule table from [`crate::domain::scoring`] and
//! attaches a cosmetic confidence value sampled from an injected RNG.
//!
//! # Mutex Behavior
//!
//! The RNG sits behind a `Mutex` so the engine can be shared with the
//! scoring worker thread. A poisoned mutex is recovered: the RNG state is
//! still usable and scoring has no failure path.

use std::sync::{Arc, Mutex};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::scoring;
use crate::domain::{MeasurementRecord, RiskAssessment};
use crate::ports::RiskEngine;

/// Reference risk scorer.
pub struct RuleBasedEngine {
    /// Source of the confidence sample
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl RuleBasedEngine {
    /// Create an engine whose confidence RNG is seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha20Rng::from_entropy())
    }

    /// Create an engine with a reproducible confidence sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, entropy otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                tracing::debug!("Confidence RNG seeded from configuration");
                Self::with_seed(seed)
            }
            None => Self::new(),
        }
    }

    fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    fn sample_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Confidence RNG lock poisoned; recovering");
            poisoned.into_inner()
        });
        rng.gen::<f64>()
    }
}

impl Default for RuleBasedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskEngine for RuleBasedEngine {
    fn evaluate(&self, measurements: &MeasurementRecord) -> RiskAssessment {
        let contributions = scoring::rule_contributions(measurements);
        let risk_score = scoring::risk_score(measurements);
        let risk = scoring::classify(risk_score);
        let confidence = scoring::shape_confidence(self.sample_unit());

        let assessment = RiskAssessment::new(
            risk,
            confidence,
            risk_score,
            contributions,
            scoring::recommendations_for(risk),
        );

        tracing::info!(
            "Assessment complete: risk={}, score={}/100, confidence={:.1}%",
            assessment.risk,
            assessment.risk_score,
            assessment.confidence
        );

        assessment
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_measurements, RiskLevel};

    #[test]
    fn test_golden_high_risk() {
        let engine = RuleBasedEngine::with_seed(7);
        let assessment = engine.evaluate(&sample_measurements());

        assert_eq!(assessment.risk, RiskLevel::High);
        assert_eq!(assessment.risk_score, 90);
        assert_eq!(
            assessment.recommendations,
            scoring::recommendations_for(RiskLevel::High)
        );
        assert_eq!(assessment.contributions.len(), scoring::SCORING_RULES.len());
    }

    #[test]
    fn test_golden_low_risk() {
        let engine = RuleBasedEngine::with_seed(7);
        let record = MeasurementRecord {
            glucose: 145.0,
            blood_pressure: 80.0,
            bmi: 20.0,
            insulin: 10.0,
            hba1c: 5.0,
            ..Default::default()
        };
        let assessment = engine.evaluate(&record);

        assert_eq!(assessment.risk_score, 25);
        assert_eq!(assessment.risk, RiskLevel::Low);
        assert_eq!(
            assessment.recommendations,
            vec!["Maintain healthy lifestyle", "Regular health checkups", "Balanced diet"]
        );
    }

    #[test]
    fn test_repeat_evaluation_is_stable_except_confidence() {
        let engine = RuleBasedEngine::new();
        let record = sample_measurements();

        let first = engine.evaluate(&record);
        for _ in 0..50 {
            let next = engine.evaluate(&record);
            assert_eq!(next.risk, first.risk);
            assert_eq!(next.risk_score, first.risk_score);
            assert_eq!(next.contributions, first.contributions);
            assert!((85.0..=95.0).contains(&next.confidence));
        }
    }

    #[test]
    fn test_seeded_engines_agree_on_confidence() {
        let a = RuleBasedEngine::with_seed(42);
        let b = RuleBasedEngine::with_seed(42);
        let record = sample_measurements();

        for _ in 0..10 {
            let ca = a.evaluate(&record).confidence;
            let cb = b.evaluate(&record).confidence;
            assert!((ca - cb).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_recommendations_ignore_which_rules_fired() {
        let engine = RuleBasedEngine::with_seed(1);
        // Two different HIGH records with different rule sets
        let hba1c_heavy = MeasurementRecord {
            hba1c: 8.0,
            glucose: 150.0,
            ..Default::default()
        };
        let body_heavy = MeasurementRecord {
            bmi: 31.0,
            blood_pressure: 90.0,
            insulin: 40.0,
            glucose: 160.0,
            ..Default::default()
        };

        let a = engine.evaluate(&hba1c_heavy);
        let b = engine.evaluate(&body_heavy);
        assert_eq!(a.risk, RiskLevel::High);
        assert_eq!(b.risk, RiskLevel::High);
        assert_ne!(a.contributions, b.contributions);
        assert_eq!(a.recommendations, b.recommendations);
    }
}
