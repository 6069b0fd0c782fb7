//! Medical test form: the eleven catalogue measurements.

use ratatui::{layout::Rect, Frame};

use super::form::{render_form, FieldKind, FormField, FormState};
use crate::application::intake::{self, IntakeError};
use crate::domain::{MeasurementRecord, MEASUREMENT_FIELDS, MEASUREMENT_FIELD_COUNT};

/// Measurement form state
pub struct MeasurementFormState {
    pub form: FormState,
}

impl Default for MeasurementFormState {
    fn default() -> Self {
        let fields = MEASUREMENT_FIELDS
            .iter()
            .map(|field| {
                let hint = if field.unit.is_empty() {
                    format!("normal {}", field.normal)
                } else {
                    format!("{}, normal {}", field.unit, field.normal)
                };
                FormField::new(field.label, hint, FieldKind::Decimal)
            })
            .collect();
        Self {
            form: FormState::new(fields),
        }
    }
}

impl MeasurementFormState {
    /// Parse the form into a record.
    ///
    /// # Errors
    /// Returns the intake rejection for the first bad field.
    pub fn to_record(&self) -> Result<MeasurementRecord, IntakeError> {
        let raw: [&str; MEASUREMENT_FIELD_COUNT] =
            std::array::from_fn(|i| self.form.fields[i].value.as_str());
        intake::parse_measurements(&raw)
    }

    pub fn load_record(&mut self, record: &MeasurementRecord) {
        let values: Vec<String> = record.to_vec().iter().map(ToString::to_string).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        self.form.set_values(&refs);
    }

    /// Load sample data for a quick demo run (scores HIGH).
    pub fn load_sample_data(&mut self) {
        self.form.set_values(&[
            "150", // glucose
            "20",  // insulin
            "7.0", // hba1c
            "210", // cholesterol
            "30",  // bmi
            "25",  // skin thickness
            "85",  // systolic
            "70",  // diastolic
            "78",  // heart rate
            "0.5", // pedigree
            "1.5", // activity
        ]);
        self.form.error_message = None;
    }
}

/// Render the measurement form
pub fn render_measurement_form(f: &mut Frame, area: Rect, state: &MeasurementFormState) {
    render_form(
        f,
        area,
        "Medical Test",
        "Step 2 of 2 │ Blood tests, physical, cardiovascular, lifestyle",
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("Enter", "Generate Prediction"),
            ("Ctrl+S", "Sample Data"),
            ("Esc", "Back"),
        ],
    );
}
