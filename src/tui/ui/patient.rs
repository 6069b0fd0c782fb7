//! Patient information form.

use ratatui::{layout::Rect, Frame};

use super::form::{render_form, FieldKind, FormField, FormState};
use crate::application::intake::{self, IntakeError, ProfileInput};
use crate::domain::{LifestyleFlags, PatientProfile};

const GENDERS: &[&str] = &["male", "female", "other"];

// Field positions
const NAME: usize = 0;
const AGE: usize = 1;
const GENDER: usize = 2;
const EMAIL: usize = 3;
const CONTACT: usize = 4;
const FAMILY_HISTORY: usize = 5;
const SMOKER: usize = 6;
const ALCOHOLIC: usize = 7;
const EXERCISE: usize = 8;

/// Patient form state
pub struct PatientFormState {
    pub form: FormState,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            form: FormState::new(vec![
                FormField::new("Full Name", "e.g. Asha Verma", FieldKind::Text),
                FormField::new("Age", "years", FieldKind::Integer),
                FormField::new("Gender", "space / ←→ to choose", FieldKind::Choice(GENDERS)),
                FormField::new("Email", "name@example.org", FieldKind::Text),
                FormField::new("Contact Number", "phone", FieldKind::Text),
                FormField::new("Family history of diabetes", "", FieldKind::Toggle),
                FormField::new("Smoker", "", FieldKind::Toggle),
                FormField::new("Regular alcohol use", "", FieldKind::Toggle),
                FormField::new("Exercise regularly", "", FieldKind::Toggle),
            ]),
        }
    }
}

impl PatientFormState {
    fn lifestyle(&self) -> LifestyleFlags {
        let fields = &self.form.fields;
        LifestyleFlags {
            family_history: fields[FAMILY_HISTORY].is_on(),
            smoker: fields[SMOKER].is_on(),
            alcoholic: fields[ALCOHOLIC].is_on(),
            exercise_regularly: fields[EXERCISE].is_on(),
        }
    }

    /// Parse the form into a profile.
    ///
    /// # Errors
    /// Returns the intake rejection for the first bad field.
    pub fn to_profile(&self) -> Result<PatientProfile, IntakeError> {
        let fields = &self.form.fields;
        intake::parse_profile(&ProfileInput {
            name: &fields[NAME].value,
            age: &fields[AGE].value,
            gender: &fields[GENDER].value,
            email: &fields[EMAIL].value,
            contact: &fields[CONTACT].value,
            lifestyle: self.lifestyle(),
        })
    }

    /// Refill from a stored profile (after the buffers were wiped).
    pub fn load_profile(&mut self, profile: &PatientProfile) {
        let age = profile.age.to_string();
        let gender = profile.gender.to_string();
        self.form.set_values(&[
            profile.name.as_str(),
            age.as_str(),
            gender.as_str(),
            profile.email.as_str(),
            profile.contact.as_str(),
        ]);
        self.set_lifestyle(profile.lifestyle);
    }

    /// Load sample data for a quick demo run.
    pub fn load_sample_data(&mut self) {
        self.form.set_values(&[
            "Asha Verma",
            "52",
            "female",
            "asha@example.org",
            "555-0142",
        ]);
        self.set_lifestyle(LifestyleFlags {
            family_history: true,
            ..LifestyleFlags::default()
        });
        self.form.error_message = None;
    }

    fn set_lifestyle(&mut self, flags: LifestyleFlags) {
        let fields = &mut self.form.fields;
        fields[FAMILY_HISTORY].set_on(flags.family_history);
        fields[SMOKER].set_on(flags.smoker);
        fields[ALCOHOLIC].set_on(flags.alcoholic);
        fields[EXERCISE].set_on(flags.exercise_regularly);
    }
}

/// Render the patient information form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    render_form(
        f,
        area,
        "Patient Information",
        "Step 1 of 2",
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("Space", "Toggle"),
            ("Enter", "Continue"),
            ("Ctrl+S", "Sample Data"),
            ("Esc", "Home"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    #[test]
    fn test_sample_data_parses() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let profile = state.to_profile().expect("sample profile is valid");
        assert_eq!(profile.name, "Asha Verma");
        assert_eq!(profile.gender, Gender::Female);
        assert!(profile.lifestyle.family_history);
        assert!(!profile.lifestyle.smoker);
    }

    #[test]
    fn test_empty_form_is_rejected() {
        let state = PatientFormState::default();
        assert_eq!(state.to_profile(), Err(IntakeError::Missing("Age")));
    }

    #[test]
    fn test_load_profile_round_trips_through_form() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let original = state.to_profile().expect("valid");

        state.form.clear_sensitive();
        assert!(state.form.is_blank());

        state.load_profile(&original);
        assert_eq!(state.to_profile(), Ok(original));
    }
}
