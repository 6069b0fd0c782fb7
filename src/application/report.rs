//! Plain-text assessment report.
//!
//! Rendering is pure; [`export_report`] is the only function touching the
//! filesystem and it only ever writes.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::{MeasurementRecord, PatientProfile, RiskAssessment, MEASUREMENT_FIELDS};
use crate::GlucoscreenError;

const DISCLAIMER: &str = "Note: This prediction is for informational purposes only.\n\
Please consult with a healthcare professional for proper diagnosis.";

/// Render the report for one completed assessment.
#[must_use]
pub fn render_text_report(
    profile: &PatientProfile,
    measurements: &MeasurementRecord,
    assessment: &RiskAssessment,
    generated_on: NaiveDate,
) -> String {
    let mut lines: Vec<String> = vec![
        "DIABETES PREDICTION REPORT".to_string(),
        "=========================".to_string(),
        String::new(),
        "Patient Information:".to_string(),
        format!("- Name: {}", profile.name),
        format!("- Age: {}", profile.age),
        format!("- Gender: {}", profile.gender),
        format!("- Email: {}", profile.email),
        String::new(),
        "Medical Test Results:".to_string(),
    ];

    for (field, value) in MEASUREMENT_FIELDS.iter().zip(measurements.to_vec()) {
        if field.unit.is_empty() {
            lines.push(format!("- {}: {}", field.label, value));
        } else if field.unit == "%" {
            lines.push(format!("- {}: {}%", field.label, value));
        } else {
            lines.push(format!("- {}: {} {}", field.label, value, field.unit));
        }
    }

    lines.push(String::new());
    lines.push("Prediction Result:".to_string());
    lines.push(format!("- Risk Level: {}", assessment.risk));
    lines.push(format!("- Confidence: {:.1}%", assessment.confidence));
    lines.push(format!("- Risk Score: {}/100", assessment.risk_score));

    let fired: Vec<String> = assessment
        .contributions
        .iter()
        .filter(|c| c.points > 0)
        .map(|c| format!("{} (+{})", c.rule, c.points))
        .collect();
    if !fired.is_empty() {
        lines.push(format!("- Contributing factors: {}", fired.join(", ")));
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    lines.extend(assessment.recommendations.iter().map(|r| format!("- {r}")));
    lines.push(String::new());
    lines.push(format!("Generated on: {}", generated_on.format("%Y-%m-%d")));
    lines.push(String::new());
    lines.push(DISCLAIMER.to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// File name for a patient's report.
///
/// Whitespace runs in the name become `-`, as does any run of characters
/// other than letters, digits, `_` and `-`, so the name can never leave `dir`.
#[must_use]
pub fn report_file_name(profile: &PatientProfile) -> String {
    let slug = profile
        .name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "diabetes-report-patient.txt".to_string()
    } else {
        format!("diabetes-report-{slug}.txt")
    }
}

/// Write the report into `dir`, creating it if needed.
///
/// # Errors
/// Returns an I/O error if the directory or file cannot be written.
pub fn export_report(
    dir: &Path,
    profile: &PatientProfile,
    measurements: &MeasurementRecord,
    assessment: &RiskAssessment,
    generated_on: NaiveDate,
) -> Result<PathBuf, GlucoscreenError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(profile));
    let content = render_text_report(profile, measurements, assessment, generated_on);
    std::fs::write(&path, content)?;

    // The file name carries the patient's name; log the directory only.
    tracing::info!(
        "Report for assessment {} exported to {}",
        assessment.id,
        dir.display()
    );
    Ok(path)
}
