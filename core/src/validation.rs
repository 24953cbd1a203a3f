//! Form state and the required-field checks run before any submission.
//!
//! Forms hold exactly what the user typed. `validate` turns that text into a
//! request payload, or into the `ValidationError` whose message the screen
//! shows instead of calling the service.

use crate::error::ValidationError;
use crate::types::{Gender, Patient, PatientInput, Test, TestInput, TestType};

/// Editable patient fields as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    /// Picker value; empty until the user selects one.
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    /// Comma-separated conditions.
    pub medical_history: String,
}

impl PatientForm {
    /// Pre-populate every field from a fetched record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            age: patient.age.to_string(),
            gender: patient.gender.as_str().to_string(),
            address: patient.address.clone().unwrap_or_default(),
            phone_number: patient.phone_number.clone().unwrap_or_default(),
            medical_history: join_medical_history(&patient.medical_history),
        }
    }

    pub fn validate(&self) -> Result<PatientInput, ValidationError> {
        let name = self.name.trim();
        let age = self.age.trim();
        let gender = self.gender.trim();
        if name.is_empty() || age.is_empty() || gender.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        let age = parse_age(age)?;
        let gender: Gender = gender.parse().map_err(|_| ValidationError::InvalidGender)?;

        Ok(PatientInput {
            name: name.to_string(),
            age,
            gender,
            address: self.address.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            medical_history: split_medical_history(&self.medical_history),
        })
    }
}

/// Editable test fields as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestForm {
    /// Picker value; empty until the user selects one.
    pub kind: String,
    pub value: String,
}

impl TestForm {
    pub fn from_test(test: &Test) -> Self {
        Self {
            kind: test.kind.label().to_string(),
            value: test.value.clone(),
        }
    }

    pub fn validate(&self) -> Result<TestInput, ValidationError> {
        let kind = self.kind.trim();
        let value = self.value.trim();
        if kind.is_empty() || value.is_empty() {
            return Err(ValidationError::MissingTestFields);
        }
        let kind: TestType = kind.parse().map_err(|_| ValidationError::InvalidTestType)?;
        Ok(TestInput {
            kind,
            value: value.to_string(),
        })
    }
}

/// Ages are whole, non-negative numbers of years.
pub fn parse_age(raw: &str) -> Result<u32, ValidationError> {
    raw.trim().parse::<u32>().map_err(|_| ValidationError::InvalidAge)
}

/// Split the comma-separated history field, trimming items and dropping
/// empty ones.
pub fn split_medical_history(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_medical_history(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PatientForm {
        PatientForm {
            name: "  John Doe ".into(),
            age: "30".into(),
            gender: "male".into(),
            address: "123 Main St".into(),
            phone_number: "555-1234".into(),
            medical_history: "Allergy, Hypertension".into(),
        }
    }

    #[test]
    fn valid_form_produces_trimmed_input() {
        let input = filled().validate().unwrap();
        assert_eq!(input.name, "John Doe");
        assert_eq!(input.age, 30);
        assert_eq!(input.gender, Gender::Male);
        assert_eq!(input.medical_history, vec!["Allergy", "Hypertension"]);
    }

    #[test]
    fn empty_name_and_age_are_missing_required_fields() {
        let form = PatientForm {
            name: String::new(),
            age: String::new(),
            ..filled()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredFields);
        assert_eq!(err.to_string(), "Please fill in all required fields.");
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let form = PatientForm {
            name: "   ".into(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn unselected_gender_is_missing() {
        let form = PatientForm {
            gender: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        for age in ["abc", "-3", "4.5"] {
            let form = PatientForm {
                age: age.into(),
                ..filled()
            };
            assert_eq!(form.validate(), Err(ValidationError::InvalidAge), "{age}");
        }
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let form = PatientForm {
            gender: "unknown".into(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidGender));
    }

    #[test]
    fn prefill_joins_history_with_comma_space() {
        let patient: Patient = serde_json::from_str(
            r#"{"name":"John Doe","age":30,"gender":"male","address":"123 Main St",
                "phoneNumber":"555-1234","medicalHistory":["Allergy","Hypertension"]}"#,
        )
        .unwrap();
        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.name, "John Doe");
        assert_eq!(form.age, "30");
        assert_eq!(form.gender, "male");
        assert_eq!(form.address, "123 Main St");
        assert_eq!(form.phone_number, "555-1234");
        assert_eq!(form.medical_history, "Allergy, Hypertension");
    }

    #[test]
    fn history_split_drops_blank_items() {
        assert_eq!(split_medical_history(" a ,, b ,"), vec!["a", "b"]);
        assert!(split_medical_history("").is_empty());
    }

    #[test]
    fn test_form_requires_both_fields() {
        let form = TestForm {
            kind: "Blood Pressure".into(),
            value: " ".into(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn test_form_parses_type() {
        let form = TestForm {
            kind: "Respiratory Rate".into(),
            value: "16".into(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.kind, TestType::RespiratoryRate);
        let bad = TestForm {
            kind: "Cholesterol".into(),
            value: "1".into(),
        };
        assert_eq!(bad.validate(), Err(ValidationError::InvalidTestType));
    }

    mod props {
        use super::super::{join_medical_history, split_medical_history};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn split_items_are_trimmed_and_non_empty(raw in "[a-z ,]{0,40}") {
                for item in split_medical_history(&raw) {
                    prop_assert!(!item.is_empty());
                    prop_assert_eq!(item.trim(), item.as_str());
                    prop_assert!(!item.contains(','));
                }
            }

            #[test]
            fn join_then_split_is_identity(
                items in prop::collection::vec("[a-zA-Z][a-zA-Z ]{0,10}[a-zA-Z]", 0..6),
            ) {
                prop_assert_eq!(split_medical_history(&join_medical_history(&items)), items);
            }
        }
    }
}
