//! Clinical measurement record for diabetes risk assessment.
//!
//! The five scored inputs are glucose, systolic blood pressure, BMI, insulin
//! and HbA1c. The remaining fields are carried through to the report but
//! never scored.

use serde::{Deserialize, Serialize};

/// Number of fields in a [`MeasurementRecord`].
pub const MEASUREMENT_FIELD_COUNT: usize = 11;

/// Form section a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementSection {
    BloodTests,
    PhysicalMeasurements,
    Cardiovascular,
    LifestyleFactors,
}

impl MeasurementSection {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::BloodTests => "Blood Tests",
            Self::PhysicalMeasurements => "Physical Measurements",
            Self::Cardiovascular => "Cardiovascular",
            Self::LifestyleFactors => "Lifestyle Factors",
        }
    }
}

/// Catalogue entry describing one measurement field.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementField {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Typical/normal range shown as a hint next to the input
    pub normal: &'static str,
    pub section: MeasurementSection,
}

/// All measurement fields in canonical order. `to_vec`/`from_vec` use this order.
pub const MEASUREMENT_FIELDS: [MeasurementField; MEASUREMENT_FIELD_COUNT] = [
    MeasurementField {
        key: "glucose",
        label: "Glucose Level",
        unit: "mg/dL",
        normal: "70-100",
        section: MeasurementSection::BloodTests,
    },
    MeasurementField {
        key: "insulin",
        label: "Insulin Level",
        unit: "mu U/ml",
        normal: "2-25",
        section: MeasurementSection::BloodTests,
    },
    MeasurementField {
        key: "hba1c",
        label: "HbA1c",
        unit: "%",
        normal: "4.0-5.6",
        section: MeasurementSection::BloodTests,
    },
    MeasurementField {
        key: "cholesterol",
        label: "Cholesterol",
        unit: "mg/dL",
        normal: "<200",
        section: MeasurementSection::BloodTests,
    },
    MeasurementField {
        key: "bmi",
        label: "BMI",
        unit: "kg/m²",
        normal: "18.5-24.9",
        section: MeasurementSection::PhysicalMeasurements,
    },
    MeasurementField {
        key: "skin_thickness",
        label: "Skin Thickness",
        unit: "mm",
        normal: "10-40",
        section: MeasurementSection::PhysicalMeasurements,
    },
    MeasurementField {
        key: "blood_pressure",
        label: "Blood Pressure (Systolic)",
        unit: "mmHg",
        normal: "90-120",
        section: MeasurementSection::Cardiovascular,
    },
    MeasurementField {
        key: "blood_pressure_diastolic",
        label: "Blood Pressure (Diastolic)",
        unit: "mmHg",
        normal: "60-80",
        section: MeasurementSection::Cardiovascular,
    },
    MeasurementField {
        key: "heart_rate",
        label: "Heart Rate",
        unit: "bpm",
        normal: "60-100",
        section: MeasurementSection::Cardiovascular,
    },
    MeasurementField {
        key: "diabetes_pedigree",
        label: "Diabetes Pedigree Function",
        unit: "",
        normal: "0.078-2.42",
        section: MeasurementSection::LifestyleFactors,
    },
    MeasurementField {
        key: "physical_activity",
        label: "Physical Activity",
        unit: "hours/week",
        normal: "2.5+",
        section: MeasurementSection::LifestyleFactors,
    },
];

/// Clinical inputs for one assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Fasting plasma glucose in mg/dL (scored)
    pub glucose: f64,
    /// Insulin in mu U/ml (scored)
    pub insulin: f64,
    /// Glycated haemoglobin in % (scored)
    pub hba1c: f64,
    /// Total cholesterol in mg/dL
    pub cholesterol: f64,
    /// Body mass index in kg/m² (scored)
    pub bmi: f64,
    /// Triceps skin fold thickness in mm
    pub skin_thickness: f64,
    /// Systolic blood pressure in mmHg (scored)
    pub blood_pressure: f64,
    pub blood_pressure_diastolic: f64,
    /// Resting heart rate in bpm
    pub heart_rate: f64,
    pub diabetes_pedigree: f64,
    /// Exercise in hours per week
    pub physical_activity: f64,
}

impl MeasurementRecord {
    /// Values in [`MEASUREMENT_FIELDS`] order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.glucose,
            self.insulin,
            self.hba1c,
            self.cholesterol,
            self.bmi,
            self.skin_thickness,
            self.blood_pressure,
            self.blood_pressure_diastolic,
            self.heart_rate,
            self.diabetes_pedigree,
            self.physical_activity,
        ]
    }

    /// Build a record from values in [`MEASUREMENT_FIELDS`] order.
    ///
    /// # Errors
    /// Returns error if the slice length is not [`MEASUREMENT_FIELD_COUNT`].
    pub fn from_vec(v: &[f64]) -> Result<Self, String> {
        if v.len() != MEASUREMENT_FIELD_COUNT {
            return Err(format!(
                "Expected {MEASUREMENT_FIELD_COUNT} measurements, got {}",
                v.len()
            ));
        }

        Ok(Self {
            glucose: v[0],
            insulin: v[1],
            hba1c: v[2],
            cholesterol: v[3],
            bmi: v[4],
            skin_thickness: v[5],
            blood_pressure: v[6],
            blood_pressure_diastolic: v[7],
            heart_rate: v[8],
            diabetes_pedigree: v[9],
            physical_activity: v[10],
        })
    }

    /// Every field must be a finite, non-negative number.
    ///
    /// # Errors
    /// Returns one message per offending field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = MEASUREMENT_FIELDS
            .iter()
            .zip(self.to_vec())
            .filter_map(|(field, value)| {
                if !value.is_finite() {
                    Some(format!("{}: {} is not a finite number", field.label, value))
                } else if value < 0.0 {
                    Some(format!("{}: {} must not be negative", field.label, value))
                } else {
                    None
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Per-indicator summary lines for the result screen and report.
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        fn finding(
            label: &'static str,
            value: f64,
            unit: &'static str,
            elevated: bool,
            (high, normal): (&'static str, &'static str),
        ) -> Finding {
            Finding {
                label,
                value,
                unit,
                elevated,
                status: if elevated { high } else { normal },
            }
        }

        const ABOVE: (&str, &str) = ("Above normal", "Normal range");

        vec![
            finding("Glucose", self.glucose, "mg/dL", self.glucose > 140.0, ABOVE),
            finding(
                "Blood Pressure",
                self.blood_pressure,
                "mmHg",
                self.blood_pressure > 80.0,
                ABOVE,
            ),
            finding(
                "BMI",
                self.bmi,
                "kg/m²",
                self.bmi > 25.0,
                ("Overweight", "Normal weight"),
            ),
            finding("HbA1c", self.hba1c, "%", self.hba1c > 6.5, ABOVE),
            finding("Insulin", self.insulin, "mu U/ml", self.insulin > 30.0, ABOVE),
            finding(
                "Cholesterol",
                self.cholesterol,
                "mg/dL",
                self.cholesterol > 200.0,
                ABOVE,
            ),
        ]
    }
}

/// Status of a single indicator relative to its reference threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub status: &'static str,
    pub elevated: bool,
}

#[cfg(test)]
pub(crate) fn sample_measurements() -> MeasurementRecord {
    MeasurementRecord {
        glucose: 150.0,
        insulin: 20.0,
        hba1c: 7.0,
        cholesterol: 210.0,
        bmi: 30.0,
        skin_thickness: 25.0,
        blood_pressure: 85.0,
        blood_pressure_diastolic: 70.0,
        heart_rate: 78.0,
        diabetes_pedigree: 0.5,
        physical_activity: 1.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_conversion_follows_catalogue_order() {
        let record = sample_measurements();
        let v = record.to_vec();
        assert_eq!(v.len(), MEASUREMENT_FIELD_COUNT);

        let glucose_idx = MEASUREMENT_FIELDS
            .iter()
            .position(|f| f.key == "glucose")
            .expect("glucose in catalogue");
        let bp_idx = MEASUREMENT_FIELDS
            .iter()
            .position(|f| f.key == "blood_pressure")
            .expect("blood pressure in catalogue");
        assert!((v[glucose_idx] - 150.0).abs() < f64::EPSILON);
        assert!((v[bp_idx] - 85.0).abs() < f64::EPSILON);

        assert_eq!(MeasurementRecord::from_vec(&v), Ok(record));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(MeasurementRecord::from_vec(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_validation_rejects_nan_and_negative() {
        assert!(sample_measurements().validate().is_ok());
        assert!(MeasurementRecord::default().validate().is_ok());

        let bad = MeasurementRecord {
            glucose: f64::NAN,
            bmi: -1.0,
            heart_rate: f64::INFINITY,
            ..sample_measurements()
        };
        let errors = bad.validate().expect_err("should fail");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Glucose Level"));
    }

    #[test]
    fn test_findings_use_strict_thresholds() {
        let record = MeasurementRecord {
            glucose: 140.0,
            blood_pressure: 80.1,
            bmi: 25.0,
            ..Default::default()
        };
        let findings = record.findings();

        assert_eq!(findings[0].status, "Normal range");
        assert!(!findings[0].elevated);
        assert_eq!(findings[1].status, "Above normal");
        assert_eq!(findings[2].status, "Normal weight");

        let overweight = MeasurementRecord { bmi: 31.0, ..record }.findings();
        assert_eq!(overweight[2].status, "Overweight");
    }
}
