//! Assessment session: the single mutable slot owned by the workflow.

use serde::Serialize;

use crate::domain::{MeasurementRecord, PatientProfile, RiskAssessment};

/// Workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Home,
    PatientForm,
    MedicalTest,
    Generating,
    Result,
    HealthTips,
}

impl Stage {
    /// Stages shown in the navigation bar, in order.
    pub const NAVIGABLE: [Stage; 5] = [
        Stage::Home,
        Stage::PatientForm,
        Stage::MedicalTest,
        Stage::Result,
        Stage::HealthTips,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::PatientForm => "Patient Info",
            Self::MedicalTest => "Medical Test",
            Self::Generating => "Generating",
            Self::Result => "Results",
            Self::HealthTips => "Health Tips",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Home => "home",
            Self::PatientForm => "patient-form",
            Self::MedicalTest => "medical-test",
            Self::Generating => "generating",
            Self::Result => "result",
            Self::HealthTips => "health-tips",
        };
        f.write_str(s)
    }
}

/// State of one assessment session.
///
/// Fields are only mutated by `AssessmentWorkflow`; readers get shared access.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) stage: Stage,
    pub(super) profile: Option<PatientProfile>,
    pub(super) measurements: Option<MeasurementRecord>,
    pub(super) assessment: Option<RiskAssessment>,
    /// Bumped on every submission and reset; stale scoring results carry an older value.
    pub(super) generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            stage: Stage::Home,
            profile: None,
            measurements: None,
            assessment: None,
            generation: 0,
        }
    }
}

impl Session {
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn profile(&self) -> Option<&PatientProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn measurements(&self) -> Option<&MeasurementRecord> {
        self.measurements.as_ref()
    }

    #[must_use]
    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// An assessment only exists alongside the profile and measurements it was computed from,
    /// and never while a new one is being generated.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.assessment {
            Some(_) => {
                self.profile.is_some()
                    && self.measurements.is_some()
                    && self.stage != Stage::Generating
            }
            None => true,
        }
    }

    /// True when no record is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.measurements.is_none() && self.assessment.is_none()
    }

    /// Drop all records and return to `Home`, invalidating in-flight results.
    pub(super) fn clear(&mut self) {
        self.profile = None;
        self.measurements = None;
        self.assessment = None;
        self.stage = Stage::Home;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_measurements, sample_profile, RiskLevel};

    #[test]
    fn test_stage_display_is_kebab_case() {
        assert_eq!(Stage::PatientForm.to_string(), "patient-form");
        assert_eq!(Stage::HealthTips.to_string(), "health-tips");
        let json = serde_json::to_string(&Stage::MedicalTest).expect("serialize");
        assert_eq!(json, "\"medical-test\"");
    }

    #[test]
    fn test_consistency() {
        let mut session = Session::default();
        assert!(session.is_consistent());
        assert!(session.is_empty());

        session.assessment = Some(RiskAssessment::new(
            RiskLevel::Low,
            90.0,
            0,
            Vec::new(),
            Vec::new(),
        ));
        assert!(!session.is_consistent());

        session.profile = Some(sample_profile());
        session.measurements = Some(sample_measurements());
        session.stage = Stage::Result;
        assert!(session.is_consistent());
    }

    #[test]
    fn test_clear_bumps_generation() {
        let mut session = Session {
            profile: Some(sample_profile()),
            stage: Stage::MedicalTest,
            ..Default::default()
        };
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.stage(), Stage::Home);
        assert_eq!(session.generation(), 1);
    }
}
