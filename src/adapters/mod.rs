//! Adapters layer: Concrete implementations of ports.
//!
//! - `rules`: the additive rule-table risk engine
//! - `sanitize`: contact-detail redaction for logs

pub mod rules;
pub mod sanitize;

pub use rules::RuleBasedEngine;
