//! Patient profile types collected by the intake form.
//!
//! A profile is captured once per session and is immutable afterwards.

use serde::{Deserialize, Serialize};

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" | "o" => Ok(Self::Other),
            other => Err(format!("Unknown gender '{other}' (expected male, female or other)")),
        }
    }
}

/// Lifestyle questions from the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleFlags {
    /// Diabetes in the immediate family
    pub family_history: bool,
    pub smoker: bool,
    pub alcoholic: bool,
    pub exercise_regularly: bool,
}

/// Identity and demographic record for one assessment session.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    /// Age in whole years
    pub age: u32,
    pub gender: Gender,
    pub email: String,
    /// Contact phone number as entered
    pub contact: String,
    pub lifestyle: LifestyleFlags,
}

// Contact details stay out of `{:?}` output so a stray debug log cannot leak them.
impl std::fmt::Debug for PatientProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientProfile")
            .field("name", &"<redacted>")
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("email", &"<redacted>")
            .field("contact", &"<redacted>")
            .field("lifestyle", &self.lifestyle)
            .finish()
    }
}

impl PatientProfile {
    /// Presence checks on the required fields.
    ///
    /// # Errors
    /// Returns every violation found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.age == 0 {
            errors.push("Age must be a positive number of years".to_string());
        }
        if self.email.trim().is_empty() {
            errors.push("Email is required".to_string());
        }
        if self.contact.trim().is_empty() {
            errors.push("Contact number is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> PatientProfile {
    PatientProfile {
        name: "Asha Verma".to_string(),
        age: 52,
        gender: Gender::Female,
        email: "asha@example.org".to_string(),
        contact: "555-0142".to_string(),
        lifestyle: LifestyleFlags {
            family_history: true,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let profile = PatientProfile {
            name: "   ".to_string(),
            age: 0,
            email: String::new(),
            ..sample_profile()
        };
        let errors = profile.validate().expect_err("should fail");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" female ".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("o".parse::<Gender>(), Ok(Gender::Other));
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_debug_redacts_contact_details() {
        let rendered = format!("{:?}", sample_profile());
        assert!(!rendered.contains("asha@example.org"));
        assert!(!rendered.contains("555-0142"));
        assert!(!rendered.contains("Asha"));
        assert!(rendered.contains("52"));
    }
}
