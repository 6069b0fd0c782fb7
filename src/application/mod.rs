//! Application layer: Use cases and services.
//!
//! This module drives the assessment session: strict intake, the workflow
//! state machine with its background scoring worker, and report export.

pub mod intake;
pub mod report;
mod session;
mod worker;
mod workflow;

pub use intake::{IntakeError, ProfileInput};
pub use session::{Session, Stage};
pub use worker::{ScoringProgress, ScoringWorker, ScoringWorkerHandle};
pub use workflow::{AssessmentWorkflow, WorkflowError};
