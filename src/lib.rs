//! # Glucoscreen
//!
//! Diabetes-risk self-assessment core with a terminal front end.
//!
//! This crate provides:
//! - A deterministic additive rule table scoring five clinical measurements
//! - A single-session assessment workflow with a cancellable processing delay
//! - Terminal UI and a headless CLI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientProfile, MeasurementRecord, RiskAssessment, rules)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (rule-based engine, log sanitizer)
//! - `application`: Intake, workflow state machine and report export
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{AssessmentWorkflow, Stage};
pub use domain::{MeasurementRecord, PatientProfile, RiskAssessment, RiskLevel};

/// Result type for Glucoscreen operations
pub type Result<T> = std::result::Result<T, GlucoscreenError>;

/// Main error type for Glucoscreen
#[derive(Debug, thiserror::Error)]
pub enum GlucoscreenError {
    #[error("Invalid input: {0}")]
    Intake(#[from] application::IntakeError),

    #[error("Workflow rejected the request: {0}")]
    Workflow(#[from] application::WorkflowError),

    #[error("Assessment did not complete in time")]
    Timeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
