//! Intake boundary: raw form strings to typed records.
//!
//! Parsing is strict. Anything that is not a finite, non-negative number is
//! rejected here instead of flowing into scoring as NaN.

use crate::domain::{
    Gender, LifestyleFlags, MeasurementRecord, PatientProfile, MEASUREMENT_FIELDS,
    MEASUREMENT_FIELD_COUNT,
};

/// Rejection reasons at the intake boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("{field}: {value} is out of range")]
    OutOfRange { field: &'static str, value: String },

    #[error("Invalid patient profile: {}", .0.join(", "))]
    Profile(Vec<String>),
}

/// Raw patient form values.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput<'a> {
    pub name: &'a str,
    pub age: &'a str,
    pub gender: &'a str,
    pub email: &'a str,
    pub contact: &'a str,
    pub lifestyle: LifestyleFlags,
}

/// Parse the patient form.
///
/// # Errors
/// Returns the first field-level error, or every presence violation as
/// [`IntakeError::Profile`].
pub fn parse_profile(input: &ProfileInput<'_>) -> Result<PatientProfile, IntakeError> {
    let age_raw = input.age.trim();
    if age_raw.is_empty() {
        return Err(IntakeError::Missing("Age"));
    }
    let age: u32 = age_raw.parse().map_err(|_| IntakeError::NotANumber {
        field: "Age",
        value: age_raw.to_string(),
    })?;
    if age == 0 {
        return Err(IntakeError::OutOfRange {
            field: "Age",
            value: age_raw.to_string(),
        });
    }

    let gender_raw = input.gender.trim();
    if gender_raw.is_empty() {
        return Err(IntakeError::Missing("Gender"));
    }
    let gender: Gender = gender_raw.parse().map_err(|_| IntakeError::OutOfRange {
        field: "Gender",
        value: gender_raw.to_string(),
    })?;

    let profile = PatientProfile {
        name: input.name.trim().to_string(),
        age,
        gender,
        email: input.email.trim().to_string(),
        contact: input.contact.trim().to_string(),
        lifestyle: input.lifestyle,
    };

    profile.validate().map_err(IntakeError::Profile)?;
    Ok(profile)
}

/// Parse measurement strings given in `MEASUREMENT_FIELDS` order.
///
/// # Errors
/// Returns the first offending field in catalogue order.
pub fn parse_measurements(
    raw: &[&str; MEASUREMENT_FIELD_COUNT],
) -> Result<MeasurementRecord, IntakeError> {
    let mut values = Vec::with_capacity(MEASUREMENT_FIELD_COUNT);

    for (field, text) in MEASUREMENT_FIELDS.iter().zip(raw.iter()) {
        values.push(parse_measurement(field.label, text)?);
    }

    MeasurementRecord::from_vec(&values).map_err(|_| IntakeError::Missing("Measurements"))
}

/// Parse a single measurement value.
///
/// # Errors
/// Empty, unparsable, non-finite and negative values are rejected.
pub fn parse_measurement(label: &'static str, raw: &str) -> Result<f64, IntakeError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(IntakeError::Missing(label));
    }

    let value: f64 = text.parse().map_err(|_| IntakeError::NotANumber {
        field: label,
        value: text.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(IntakeError::OutOfRange {
            field: label,
            value: text.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [&str; MEASUREMENT_FIELD_COUNT] = [
        "150", "20", "7.0", "190", "30", "25", "85", "70", "72", "0.5", "3",
    ];

    fn profile_input() -> ProfileInput<'static> {
        ProfileInput {
            name: " Ravi Kumar ",
            age: "47",
            gender: "Male",
            email: "ravi@example.org",
            contact: "555-0100",
            lifestyle: LifestyleFlags {
                smoker: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_valid_measurements() {
        let record = parse_measurements(&VALID).expect("valid input");
        assert!((record.glucose - 150.0).abs() < f64::EPSILON);
        assert!((record.blood_pressure - 85.0).abs() < f64::EPSILON);
        assert!((record.hba1c - 7.0).abs() < f64::EPSILON);
        assert!((record.physical_activity - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_numeric_is_rejected_not_nan() {
        let mut raw = VALID;
        raw[0] = "abc";
        assert_eq!(
            parse_measurements(&raw),
            Err(IntakeError::NotANumber {
                field: "Glucose Level",
                value: "abc".to_string()
            })
        );

        // "NaN" parses as f64 but must not get through
        raw[0] = "NaN";
        assert!(matches!(
            parse_measurements(&raw),
            Err(IntakeError::OutOfRange { field: "Glucose Level", .. })
        ));
    }

    #[test]
    fn test_missing_and_negative() {
        let mut raw = VALID;
        raw[4] = "  ";
        assert_eq!(parse_measurements(&raw), Err(IntakeError::Missing("BMI")));

        let mut raw = VALID;
        raw[6] = "-5";
        assert!(matches!(
            parse_measurements(&raw),
            Err(IntakeError::OutOfRange { field: "Blood Pressure (Systolic)", .. })
        ));
    }

    #[test]
    fn test_first_error_wins() {
        let mut raw = VALID;
        raw[1] = "x";
        raw[0] = "";
        assert_eq!(
            parse_measurements(&raw),
            Err(IntakeError::Missing("Glucose Level"))
        );
    }

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(&profile_input()).expect("valid profile");
        assert_eq!(profile.name, "Ravi Kumar");
        assert_eq!(profile.age, 47);
        assert_eq!(profile.gender, Gender::Male);
        assert!(profile.lifestyle.smoker);
    }

    #[test]
    fn test_profile_rejections() {
        let input = ProfileInput {
            age: "forty",
            ..profile_input()
        };
        assert!(matches!(
            parse_profile(&input),
            Err(IntakeError::NotANumber { field: "Age", .. })
        ));

        let input = ProfileInput {
            age: "0",
            ..profile_input()
        };
        assert!(matches!(
            parse_profile(&input),
            Err(IntakeError::OutOfRange { field: "Age", .. })
        ));

        let input = ProfileInput {
            gender: "",
            ..profile_input()
        };
        assert_eq!(parse_profile(&input), Err(IntakeError::Missing("Gender")));

        let input = ProfileInput {
            name: "",
            email: " ",
            ..profile_input()
        };
        match parse_profile(&input) {
            Err(IntakeError::Profile(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
