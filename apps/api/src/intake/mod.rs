//! Client intake form: the fields a social worker fills in, the required-field
//! rule, and the canned example queries.

pub mod examples;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub use examples::{example, EXAMPLE_LOCATION, EXAMPLE_QUERIES};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientIntake {
    #[serde(default)]
    pub needs: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub demographics: Option<String>,
}

/// Partial update of the form fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakePatch {
    pub needs: Option<String>,
    pub location: Option<String>,
    pub demographics: Option<String>,
}

impl ClientIntake {
    #[cfg(test)]
    pub fn new(needs: &str, location: &str) -> Self {
        Self {
            needs: needs.to_string(),
            location: location.to_string(),
            demographics: None,
        }
    }

    /// Needs and location are both required.
    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.needs.trim().is_empty() {
            missing.push("needs");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Required field(s) missing: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn apply(&mut self, patch: IntakePatch) {
        if let Some(needs) = patch.needs {
            self.needs = needs;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(demographics) = patch.demographics {
            self.demographics = Some(demographics).filter(|d| !d.trim().is_empty());
        }
    }

    /// Fills needs and location from an example query. Demographics are kept.
    pub fn apply_example(&mut self, index: usize) -> Result<(), AppError> {
        let text = example(index).ok_or_else(|| {
            AppError::NotFound(format!(
                "Example {index} not found (0..{})",
                EXAMPLE_QUERIES.len()
            ))
        })?;
        self.needs = text.to_string();
        self.location = EXAMPLE_LOCATION.to_string();
        Ok(())
    }

    /// The user turn sent to the LLM.
    pub fn user_message(&self) -> String {
        let demographics = self
            .demographics
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Not specified");

        format!(
            "Client Information:\n\
             Needs: {}\n\
             Location: {}\n\
             Demographics: {}\n\n\
             Please provide specific resource recommendations for this client, \
             including what types of services to look for and next steps.",
            self.needs, self.location, demographics
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_disabled_until_required_fields_set() {
        let mut intake = ClientIntake::default();
        assert!(!intake.can_submit());

        intake.needs = "emergency food".into();
        assert!(!intake.can_submit());
        assert_eq!(intake.missing_fields(), vec!["location"]);

        intake.location = "60601".into();
        assert!(intake.can_submit());
    }

    #[test]
    fn test_whitespace_only_fields_count_as_empty() {
        let intake = ClientIntake::new("   ", "\t");
        assert!(!intake.can_submit());
        let err = intake.validate().unwrap_err();
        assert!(err.to_string().contains("needs, location"));
    }

    #[test]
    fn test_demographics_optional() {
        let intake = ClientIntake::new("housing", "Chicago, IL");
        assert!(intake.validate().is_ok());
        assert!(intake.user_message().contains("Demographics: Not specified\n\n"));
    }

    #[test]
    fn test_user_message_layout() {
        let intake = ClientIntake {
            needs: "food".into(),
            location: "60601".into(),
            demographics: Some("family of 3".into()),
        };
        assert_eq!(
            intake.user_message(),
            "Client Information:\nNeeds: food\nLocation: 60601\nDemographics: family of 3\n\n\
             Please provide specific resource recommendations for this client, including what \
             types of services to look for and next steps."
        );
    }

    #[test]
    fn test_apply_example_keeps_demographics() {
        let mut intake = ClientIntake {
            needs: String::new(),
            location: "Springfield".into(),
            demographics: Some("veteran".into()),
        };
        intake.apply_example(2).unwrap();
        assert_eq!(intake.needs, EXAMPLE_QUERIES[2]);
        assert_eq!(intake.location, EXAMPLE_LOCATION);
        assert_eq!(intake.demographics.as_deref(), Some("veteran"));
    }

    #[test]
    fn test_apply_example_out_of_range() {
        let mut intake = ClientIntake::default();
        assert!(matches!(
            intake.apply_example(EXAMPLE_QUERIES.len()),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(intake, ClientIntake::default());
    }

    #[test]
    fn test_patch_blank_demographics_clears() {
        let mut intake = ClientIntake::new("food", "60601");
        intake.apply(IntakePatch {
            demographics: Some("senior".into()),
            ..Default::default()
        });
        assert_eq!(intake.demographics.as_deref(), Some("senior"));
        intake.apply(IntakePatch {
            demographics: Some(" ".into()),
            ..Default::default()
        });
        assert_eq!(intake.demographics, None);
        assert_eq!(intake.needs, "food");
    }
}
