//! Assessment workflow: the single-session state machine.
//!
//! All session mutations go through the transition methods here. Scoring runs
//! on a [`ScoringWorker`] after the processing delay; its result is applied by
//! [`AssessmentWorkflow::poll`] only if the worker's generation token still
//! matches the session, so a reset or a newer submission always wins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::session::{Session, Stage};
use super::worker::{ScoringProgress, ScoringWorker, ScoringWorkerHandle};
use crate::domain::{MeasurementRecord, PatientProfile, RiskAssessment};
use crate::ports::RiskEngine;

/// Rejected workflow transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("An assessment is being generated")]
    Busy,

    #[error("Patient information must be submitted first")]
    MissingProfile,

    #[error("Invalid patient profile: {}", .0.join(", "))]
    InvalidProfile(Vec<String>),

    #[error("Invalid measurements: {}", .0.join(", "))]
    InvalidMeasurements(Vec<String>),

    #[error("No assessment available")]
    NoAssessment,

    #[error("Cannot navigate to {0}")]
    InvalidTransition(Stage),
}

/// Drives one assessment session from intake to result.
pub struct AssessmentWorkflow<E>
where
    E: RiskEngine + 'static,
{
    engine: Arc<E>,
    processing_delay: Duration,
    session: Session,
    worker: Option<ScoringWorkerHandle>,
}

impl<E> AssessmentWorkflow<E>
where
    E: RiskEngine + 'static,
{
    /// Create a workflow at `Home` with an empty session.
    pub fn new(engine: Arc<E>, processing_delay: Duration) -> Self {
        tracing::debug!(
            "Assessment workflow ready: engine={}, delay={}ms",
            engine.name(),
            processing_delay.as_millis()
        );
        Self {
            engine,
            processing_delay,
            session: Session::default(),
            worker: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn profile(&self) -> Option<&PatientProfile> {
        self.session.profile()
    }

    #[must_use]
    pub fn measurements(&self) -> Option<&MeasurementRecord> {
        self.session.measurements()
    }

    /// The current assessment. Never a stale or partial one: it is cleared on
    /// every submission and only set once scoring for that submission completes.
    #[must_use]
    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.session.assessment()
    }

    #[must_use]
    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }

    /// True while a scoring continuation is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.worker.is_some()
    }

    /// Fraction of the processing delay elapsed, if scoring is in flight.
    #[must_use]
    pub fn generating_progress(&self, now: Instant) -> Option<f64> {
        self.worker.as_ref().map(|w| w.progress_at(now))
    }

    /// Store the patient profile and move to the medical test.
    ///
    /// # Errors
    /// [`WorkflowError::Busy`] while generating, [`WorkflowError::InvalidProfile`]
    /// when presence checks fail.
    pub fn submit_profile(&mut self, profile: PatientProfile) -> Result<(), WorkflowError> {
        if self.is_generating() {
            return Err(WorkflowError::Busy);
        }
        profile.validate().map_err(WorkflowError::InvalidProfile)?;

        if self.session.profile.is_some() {
            tracing::debug!("Overwriting stored patient profile");
        }
        self.session.profile = Some(profile);
        self.session.stage = Stage::MedicalTest;
        tracing::info!("Patient profile submitted");

        self.check_invariants();
        Ok(())
    }

    /// Store the measurements and start scoring after the processing delay.
    ///
    /// Rejects NaN, infinite and negative values. A submission while another is
    /// in flight replaces it.
    ///
    /// # Errors
    /// [`WorkflowError::MissingProfile`] without a stored profile,
    /// [`WorkflowError::InvalidMeasurements`] for non-finite or negative values.
    pub fn submit_measurements(
        &mut self,
        measurements: MeasurementRecord,
    ) -> Result<(), WorkflowError> {
        if self.session.profile.is_none() {
            return Err(WorkflowError::MissingProfile);
        }
        measurements
            .validate()
            .map_err(WorkflowError::InvalidMeasurements)?;

        if let Some(previous) = self.worker.take() {
            tracing::info!(
                "Replacing in-flight assessment (generation {})",
                previous.generation()
            );
            previous.cancel();
        }

        self.session.generation = self.session.generation.wrapping_add(1);
        self.session.measurements = Some(measurements);
        self.session.assessment = None;
        self.session.stage = Stage::Generating;

        let generation = self.session.generation;
        self.worker = Some(ScoringWorker::spawn(
            Arc::clone(&self.engine),
            measurements,
            generation,
            self.processing_delay,
        ));
        tracing::info!("Generating assessment (generation {})", generation);

        self.check_invariants();
        Ok(())
    }

    /// Apply any finished scoring. Returns true if an assessment was stored.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Some(progress) = self.worker.as_ref().and_then(ScoringWorkerHandle::try_recv) {
            applied |= self.apply(progress);
        }
        applied
    }

    /// Block until the in-flight assessment lands or `timeout` passes.
    pub fn wait_for_assessment(&mut self, timeout: Duration) -> Option<&RiskAssessment> {
        let deadline = Instant::now() + timeout;

        while self.worker.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!("Timed out waiting for assessment");
                break;
            }
            let next = self
                .worker
                .as_ref()
                .and_then(|w| w.recv_timeout(remaining));
            match next {
                Some(progress) => {
                    self.apply(progress);
                }
                None => break,
            }
        }

        self.session.assessment()
    }

    /// Lateral navigation; never touches stored records.
    ///
    /// # Errors
    /// See [`WorkflowError`] for the refused targets.
    pub fn navigate(&mut self, target: Stage) -> Result<(), WorkflowError> {
        let next = match target {
            Stage::Home | Stage::HealthTips => target,
            Stage::PatientForm => {
                if self.is_generating() {
                    return Err(WorkflowError::Busy);
                }
                target
            }
            Stage::MedicalTest => {
                if self.is_generating() {
                    return Err(WorkflowError::Busy);
                }
                if self.session.profile.is_none() {
                    return Err(WorkflowError::MissingProfile);
                }
                target
            }
            Stage::Result => {
                if self.session.assessment.is_some() {
                    Stage::Result
                } else if self.is_generating() {
                    Stage::Generating
                } else {
                    return Err(WorkflowError::NoAssessment);
                }
            }
            Stage::Generating => return Err(WorkflowError::InvalidTransition(target)),
        };

        if next != self.session.stage {
            tracing::debug!("Navigate {} -> {}", self.session.stage, next);
        }
        self.session.stage = next;
        self.check_invariants();
        Ok(())
    }

    /// Discard everything and return to `Home`. Safe from any stage.
    pub fn reset(&mut self) {
        self.clear_session();
        tracing::info!("Session reset");
    }

    /// Sign-out: same effect as [`reset`](Self::reset).
    pub fn logout(&mut self) {
        self.clear_session();
        tracing::info!("User logged out; session cleared");
    }

    fn clear_session(&mut self) {
        if let Some(worker) = self.worker.take() {
            tracing::debug!(
                "Cancelling in-flight assessment (generation {})",
                worker.generation()
            );
            worker.cancel();
        }
        self.session.clear();
        self.check_invariants();
    }

    fn apply(&mut self, progress: ScoringProgress) -> bool {
        let current = self.session.generation;

        if progress.generation() != current {
            tracing::debug!(
                "Dropping stale scoring message (generation {}, current {})",
                progress.generation(),
                current
            );
            return false;
        }

        match progress {
            ScoringProgress::Started { .. } => false,
            ScoringProgress::Cancelled { .. } => {
                self.worker = None;
                if self.session.stage == Stage::Generating {
                    self.session.stage = Stage::MedicalTest;
                }
                false
            }
            ScoringProgress::Complete { assessment, .. } => {
                self.worker = None;
                if self.session.stage == Stage::Generating {
                    self.session.stage = Stage::Result;
                }
                self.session.assessment = Some(assessment);
                tracing::info!("Assessment ready (generation {})", current);
                self.check_invariants();
                true
            }
        }
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.session.is_consistent(),
            "inconsistent session at {}",
            self.session.stage
        );
        debug_assert!(
            self.session.stage != Stage::Generating || self.worker.is_some(),
            "generating without a worker"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RuleBasedEngine;
    use crate::domain::{sample_measurements, sample_profile, RiskLevel};

    const SHORT: Duration = Duration::from_millis(80);
    const WAIT: Duration = Duration::from_secs(5);

    fn workflow(delay: Duration) -> AssessmentWorkflow<RuleBasedEngine> {
        AssessmentWorkflow::new(Arc::new(RuleBasedEngine::with_seed(11)), delay)
    }

    fn low_risk() -> MeasurementRecord {
        MeasurementRecord {
            glucose: 90.0,
            blood_pressure: 75.0,
            bmi: 22.0,
            insulin: 10.0,
            hba1c: 5.0,
            ..sample_measurements()
        }
    }

    #[test]
    fn test_happy_path_reaches_result_after_delay() {
        let mut wf = workflow(SHORT);
        assert_eq!(wf.stage(), Stage::Home);

        wf.submit_profile(sample_profile()).expect("profile");
        assert_eq!(wf.stage(), Stage::MedicalTest);

        let started = Instant::now();
        wf.submit_measurements(sample_measurements()).expect("measurements");
        assert_eq!(wf.stage(), Stage::Generating);
        assert!(wf.assessment().is_none());
        assert!(!wf.poll());
        assert!(wf.assessment().is_none());

        let assessment = wf.wait_for_assessment(WAIT).expect("assessment").clone();
        assert!(started.elapsed() >= SHORT);
        assert_eq!(assessment.risk, RiskLevel::High);
        assert_eq!(assessment.risk_score, 90);
        assert_eq!(wf.stage(), Stage::Result);
        assert!(!wf.is_generating());
        assert!(wf.session().is_consistent());
    }

    #[test]
    fn test_poll_applies_completion() {
        let mut wf = workflow(Duration::from_millis(10));
        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(low_risk()).expect("measurements");

        let deadline = Instant::now() + WAIT;
        while !wf.poll() {
            assert!(Instant::now() < deadline, "assessment never arrived");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(wf.stage(), Stage::Result);
        assert_eq!(wf.assessment().map(|a| a.risk_score), Some(0));
    }

    #[test]
    fn test_reset_during_generating_drops_result() {
        let mut wf = workflow(SHORT);
        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(sample_measurements()).expect("measurements");
        wf.reset();

        assert_eq!(wf.stage(), Stage::Home);
        assert!(wf.session().is_empty());

        std::thread::sleep(SHORT * 3);
        assert!(!wf.poll());
        assert!(wf.wait_for_assessment(Duration::from_millis(50)).is_none());
        assert_eq!(wf.stage(), Stage::Home);
        assert!(wf.session().is_empty());
    }

    #[test]
    fn test_reset_from_every_stage() {
        let mut wf = workflow(Duration::ZERO);
        wf.reset();
        assert!(wf.session().is_empty());

        wf.submit_profile(sample_profile()).expect("profile");
        wf.logout();
        assert_eq!(wf.stage(), Stage::Home);
        assert!(wf.session().is_empty());

        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(sample_measurements()).expect("measurements");
        wf.wait_for_assessment(WAIT).expect("assessment");
        wf.navigate(Stage::HealthTips).expect("tips");
        wf.reset();
        assert_eq!(wf.stage(), Stage::Home);
        assert!(wf.profile().is_none());
        assert!(wf.measurements().is_none());
        assert!(wf.assessment().is_none());
    }

    #[test]
    fn test_last_submission_wins() {
        let mut wf = workflow(SHORT);
        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(sample_measurements()).expect("first");
        wf.submit_measurements(low_risk()).expect("second");

        let assessment = wf.wait_for_assessment(WAIT).expect("assessment");
        assert_eq!(assessment.risk, RiskLevel::Low);
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(wf.measurements(), Some(&low_risk()));
    }

    #[test]
    fn test_submission_rejections() {
        let mut wf = workflow(SHORT);
        assert_eq!(
            wf.submit_measurements(sample_measurements()),
            Err(WorkflowError::MissingProfile)
        );

        let mut nameless = sample_profile();
        nameless.name = "  ".to_string();
        assert!(matches!(
            wf.submit_profile(nameless),
            Err(WorkflowError::InvalidProfile(_))
        ));
        assert_eq!(wf.stage(), Stage::Home);

        wf.submit_profile(sample_profile()).expect("profile");
        let bad = MeasurementRecord {
            glucose: f64::NAN,
            bmi: -1.0,
            ..sample_measurements()
        };
        match wf.submit_measurements(bad) {
            Err(WorkflowError::InvalidMeasurements(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(wf.stage(), Stage::MedicalTest);
        assert!(!wf.is_generating());

        wf.submit_measurements(sample_measurements()).expect("measurements");
        assert_eq!(wf.submit_profile(sample_profile()), Err(WorkflowError::Busy));
        wf.reset();
    }

    #[test]
    fn test_profile_resubmission_overwrites() {
        let mut wf = workflow(SHORT);
        wf.submit_profile(sample_profile()).expect("first");
        let mut other = sample_profile();
        other.age = 61;
        wf.submit_profile(other).expect("second");
        assert_eq!(wf.profile().map(|p| p.age), Some(61));
        assert_eq!(wf.stage(), Stage::MedicalTest);
    }

    #[test]
    fn test_navigation_rules() {
        let mut wf = workflow(SHORT);
        assert_eq!(wf.navigate(Stage::MedicalTest), Err(WorkflowError::MissingProfile));
        assert_eq!(wf.navigate(Stage::Result), Err(WorkflowError::NoAssessment));
        assert_eq!(
            wf.navigate(Stage::Generating),
            Err(WorkflowError::InvalidTransition(Stage::Generating))
        );
        wf.navigate(Stage::HealthTips).expect("tips");
        wf.navigate(Stage::PatientForm).expect("form");

        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(sample_measurements()).expect("measurements");
        assert_eq!(wf.navigate(Stage::PatientForm), Err(WorkflowError::Busy));
        assert_eq!(wf.navigate(Stage::MedicalTest), Err(WorkflowError::Busy));

        // Lateral navigation while generating keeps the stage put on completion.
        wf.navigate(Stage::HealthTips).expect("tips");
        let score = wf.wait_for_assessment(WAIT).map(|a| a.risk_score);
        assert_eq!(score, Some(90));
        assert_eq!(wf.stage(), Stage::HealthTips);

        wf.navigate(Stage::Home).expect("home");
        wf.navigate(Stage::Result).expect("result");
        assert_eq!(wf.stage(), Stage::Result);
        assert!(wf.profile().is_some());
    }

    #[test]
    fn test_stale_generation_messages_are_dropped() {
        let engine = RuleBasedEngine::with_seed(3);
        let mut wf = workflow(Duration::from_secs(5));
        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(low_risk()).expect("first");
        wf.submit_measurements(sample_measurements()).expect("second");
        let current = wf.session().generation();
        let stale = current - 1;

        let applied = wf.apply(ScoringProgress::Complete {
            generation: stale,
            assessment: engine.evaluate(&low_risk()),
        });
        assert!(!applied);
        assert_eq!(wf.stage(), Stage::Generating);
        assert!(wf.assessment().is_none());
        assert!(wf.is_generating());

        assert!(!wf.apply(ScoringProgress::Cancelled { generation: stale }));
        assert_eq!(wf.stage(), Stage::Generating);
        assert!(wf.is_generating());

        assert!(wf.apply(ScoringProgress::Complete {
            generation: current,
            assessment: engine.evaluate(&sample_measurements()),
        }));
        assert_eq!(wf.stage(), Stage::Result);
        assert_eq!(wf.assessment().map(|a| a.risk_score), Some(90));
    }

    #[test]
    fn test_navigate_result_while_generating_returns_to_generating() {
        let mut wf = workflow(Duration::from_secs(5));
        wf.submit_profile(sample_profile()).expect("profile");
        wf.submit_measurements(sample_measurements()).expect("measurements");
        wf.navigate(Stage::Home).expect("home");
        wf.navigate(Stage::Result).expect("result");
        assert_eq!(wf.stage(), Stage::Generating);

        let progress = wf.generating_progress(Instant::now()).expect("in flight");
        assert!((0.0..1.0).contains(&progress));
        wf.reset();
        assert!(wf.generating_progress(Instant::now()).is_none());
    }
}
