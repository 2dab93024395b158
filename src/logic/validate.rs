use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorType {
    MissingRequiredField,
    /// The collection already holds the largest possible id
    IdExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub error_type: ValidationErrorType,
    pub message: String,
}

/// Field-keyed set of problems found in a draft or merged row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("invalid {}: {}", .collection, join_fields(.errors))]
pub struct ValidationErrors {
    pub collection: Collection,
    errors: BTreeMap<String, ValidationError>,
}

fn join_fields(errors: &BTreeMap<String, ValidationError>) -> String {
    errors
        .values()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            errors: BTreeMap::new(),
        }
    }

    pub fn missing(&mut self, field: &str) {
        self.errors.insert(
            field.to_string(),
            ValidationError {
                field: field.to_string(),
                error_type: ValidationErrorType::MissingRequiredField,
                message: format!("{} is required", field),
            },
        );
    }

    /// No id is left to hand out for a new row
    pub fn id_exhausted(collection: Collection) -> Self {
        let mut errors = Self::new(collection);
        errors.errors.insert(
            "id".to_string(),
            ValidationError {
                field: "id".to_string(),
                error_type: ValidationErrorType::IdExhausted,
                message: format!("no {} ids left to assign", collection.label().to_lowercase()),
            },
        );
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Message for one field, as a form would show it next to the input
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }
}

/// Collects missing required fields while a row is being assembled
pub struct RequiredFields {
    errors: ValidationErrors,
}

impl RequiredFields {
    pub fn new(collection: Collection) -> Self {
        Self {
            errors: ValidationErrors::new(collection),
        }
    }

    /// Required text from a draft; blank input counts as absent
    pub fn text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ => {
                self.errors.missing(field);
                None
            }
        }
    }

    /// Required non-text value from a draft
    pub fn value<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.errors.missing(field);
        }
        value
    }

    /// Check text already stored on a row
    pub fn check_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.missing(field);
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_missing() {
        let mut required = RequiredFields::new(Collection::Athlete);
        assert_eq!(required.text("name", Some("   ".to_string())), None);
        assert_eq!(required.text("email", None), None);
        assert_eq!(
            required.text("sport", Some("Soccer".to_string())),
            Some("Soccer".to_string())
        );

        let errors = required.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message("name"), Some("name is required"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("sport"));
    }

    #[test]
    fn test_finish_ok_when_nothing_missing() {
        let mut required = RequiredFields::new(Collection::Group);
        required.check_text("name", "Varsity");
        assert!(required.value("coachId", Some(2)).is_some());
        assert!(required.finish().is_ok());
    }

    #[test]
    fn test_id_exhausted_message() {
        let errors = ValidationErrors::id_exhausted(Collection::Coach);
        assert!(errors.contains("id"));
        assert_eq!(
            errors.iter().next().map(|e| e.error_type),
            Some(ValidationErrorType::IdExhausted)
        );
        assert_eq!(errors.to_string(), "invalid Coach: no coach ids left to assign");
    }

    #[test]
    fn test_display_lists_messages() {
        let mut errors = ValidationErrors::new(Collection::School);
        errors.missing("zip");
        errors.missing("city");
        assert_eq!(
            errors.to_string(),
            "invalid School: city is required, zip is required"
        );
    }
}
