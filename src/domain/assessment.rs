//! Risk assessment result types.
//!
//! A [`RiskAssessment`] is produced once per submitted measurement record
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Binary diabetes risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Score at or below the high-risk threshold
    Low,
    /// Score strictly above the high-risk threshold
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low diabetes risk detected. Continue maintaining a healthy lifestyle and regular check-ups.",
            Self::High => "High diabetes risk detected. Please consult with a healthcare professional for proper evaluation.",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129), // Emerald (#10B981)
            Self::High => (244, 63, 94), // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Display banding of the numeric risk score (gauge colour).
///
/// Independent of [`RiskLevel`]; a score of 45 is `Medium` here but still `LOW` risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            Self::High
        } else if score > 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Points awarded by one scoring rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: String,
    pub points: u8,
}

/// Output of the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,

    pub risk: RiskLevel,

    /// Cosmetic confidence in percent, one decimal place.
    ///
    /// Randomly sampled to mimic model uncertainty; it carries no statistical meaning.
    pub confidence: f64,

    /// Sum of triggered rule points, 0-100
    pub risk_score: u8,

    /// Per-rule breakdown in rule-table order
    pub contributions: Vec<RuleContribution>,

    /// Fixed advice list selected by `risk` alone
    pub recommendations: Vec<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Assemble an assessment with a fresh id and timestamp.
    #[must_use]
    pub fn new(
        risk: RiskLevel,
        confidence: f64,
        risk_score: u8,
        contributions: Vec<RuleContribution>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            id: uuid_v4(),
            risk,
            confidence,
            risk_score,
            contributions,
            recommendations,
            created_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.risk_score)
    }
}

/// Random UUID v4 string from a ChaCha20 CSPRNG seeded by the OS.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_edges() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(41), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(71), ScoreBand::High);
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        let json = serde_json::to_string(&RiskLevel::High).expect("serialize");
        assert_eq!(json, "\"HIGH\"");
        assert_eq!(RiskLevel::Low.to_string(), "LOW");
    }

    #[test]
    fn test_assessment_ids_are_unique_v4() {
        let a = RiskAssessment::new(RiskLevel::Low, 90.0, 0, Vec::new(), Vec::new());
        let b = RiskAssessment::new(RiskLevel::Low, 90.0, 0, Vec::new(), Vec::new());
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 36);
        assert_eq!(a.id.as_bytes()[14], b'4');
    }
}
