//! Error types for forms.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation.
    #[error("validation errors: {0}")]
    ValidationErrors(ValidationErrors),

    /// A validator pattern failed to compile.
    #[error("invalid validator pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Collection of validation errors by field.
///
/// Fields are kept in name order so that reports are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list.
    #[must_use]
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }

    /// Converts the collection into a `Result`, failing when any field has
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ValidationErrors`] holding `self` when it is not
    /// empty.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::ValidationErrors(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.all_errors() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_into_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_errors_are_grouped_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "too short");
        errors.add("email", "bad address");
        errors.add("username", "bad characters");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("username").map(Vec::len), Some(2));
        assert_eq!(errors.all_errors().len(), 3);
        assert_eq!(
            errors.to_string(),
            "email: bad address; username: too short; username: bad characters"
        );
    }

    #[test]
    fn test_non_empty_errors_into_err() {
        let mut errors = ValidationErrors::new();
        errors.add("bio", "too long");
        match errors.into_result() {
            Err(FormError::ValidationErrors(e)) => assert_eq!(e.len(), 1),
            other => panic!("expected validation errors, got {other:?}"),
        }
    }
}
