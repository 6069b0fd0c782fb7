//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens follow the workflow stages:
//! - Home with session status
//! - Patient information and medical test forms
//! - Generating gauge and prediction result with report export
//! - Health tips

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
