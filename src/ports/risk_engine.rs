//! Risk engine port: Trait for turning measurements into a risk assessment.
//!
//! The workflow only depends on this trait, so the rule-based engine can be
//! swapped for a fixed-output engine in tests or a real model later.

use crate::domain::{MeasurementRecord, RiskAssessment};

/// Trait for risk scoring.
///
/// Implementations must be pure with respect to the record: identical input
/// yields identical `risk` and `risk_score`. Only `confidence` may vary.
/// Evaluation has no failure path for numeric input.
pub trait RiskEngine: Send + Sync {
    /// Score a measurement record.
    fn evaluate(&self, measurements: &MeasurementRecord) -> RiskAssessment;

    /// Short engine name for logs and reports.
    fn name(&self) -> &'static str;
}
