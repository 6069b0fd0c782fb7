//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. Scoring rules live here so they can be
//! tested without any adapter.

mod assessment;
pub mod health_tips;
mod measurement;
mod patient;
pub mod scoring;

pub use assessment::{RiskAssessment, RiskLevel, RuleContribution, ScoreBand};
pub use measurement::{
    Finding, MeasurementField, MeasurementRecord, MeasurementSection, MEASUREMENT_FIELDS,
    MEASUREMENT_FIELD_COUNT,
};
pub use patient::{Gender, LifestyleFlags, PatientProfile};

#[cfg(test)]
pub(crate) use measurement::sample_measurements;
#[cfg(test)]
pub(crate) use patient::sample_profile;
