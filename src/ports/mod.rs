//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the workflow and the scoring implementation.

mod risk_engine;

pub use risk_engine::RiskEngine;
