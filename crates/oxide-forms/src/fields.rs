//! Field identities and per-call validation inputs and outputs.

use serde::{Deserialize, Serialize};

/// The kind of a field, derived from its `name`.
///
/// Only a handful of names carry dedicated rules; everything else is
/// generic text that is checked for presence only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `username`
    Username,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `password2`, the confirmation of `password`.
    PasswordConfirmation,
    /// `bio`
    Bio,
    /// Any other field.
    Text,
}

impl FieldKind {
    /// Classifies a field by its name attribute.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "username" => Self::Username,
            "email" => Self::Email,
            "password" => Self::Password,
            "password2" => Self::PasswordConfirmation,
            "bio" => Self::Bio,
            _ => Self::Text,
        }
    }

    /// Returns the canonical field name, or `None` for generic text.
    #[must_use]
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Username => Some("username"),
            Self::Email => Some("email"),
            Self::Password => Some("password"),
            Self::PasswordConfirmation => Some("password2"),
            Self::Bio => Some("bio"),
            Self::Text => None,
        }
    }
}

/// Snapshot of a field taken at the moment of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Field name.
    pub name: String,
    /// Kind derived from the name.
    pub kind: FieldKind,
    /// Current, untrimmed value.
    pub value: String,
    /// Whether the field carries the `required` attribute.
    pub required: bool,
}

impl FieldContext {
    /// Creates a context for an optional field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: FieldKind::from_name(&name),
            name,
            value: value.into(),
            required: false,
        }
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    message: String,
}

impl ValidationResult {
    /// A passing result with an empty message.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// A failing result carrying the message to show.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Returns whether the value passed every rule.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the failure message (empty when valid).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::result::Result<(), String>> for ValidationResult {
    fn from(outcome: std::result::Result<(), String>) -> Self {
        match outcome {
            Ok(()) => Self::valid(),
            Err(message) => Self::invalid(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(FieldKind::from_name("username"), FieldKind::Username);
        assert_eq!(
            FieldKind::from_name("password2"),
            FieldKind::PasswordConfirmation
        );
        assert_eq!(FieldKind::from_name("title"), FieldKind::Text);
        assert_eq!(FieldKind::from_name("Email"), FieldKind::Text);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            FieldKind::Username,
            FieldKind::Email,
            FieldKind::Password,
            FieldKind::PasswordConfirmation,
            FieldKind::Bio,
        ] {
            let name = kind.as_str().unwrap();
            assert_eq!(FieldKind::from_name(name), kind);
        }
        assert_eq!(FieldKind::Text.as_str(), None);
    }

    #[test]
    fn test_context_builder() {
        let ctx = FieldContext::new("email", "  a@b.co ").required(true);
        assert_eq!(ctx.kind, FieldKind::Email);
        assert!(ctx.required);
        assert_eq!(ctx.trimmed(), "a@b.co");
        assert_eq!(ctx.value, "  a@b.co ");
    }

    #[test]
    fn test_result_from_validator_outcome() {
        assert!(ValidationResult::from(Ok::<(), String>(())).is_valid());
        let failed = ValidationResult::from(Err::<(), String>("nope".to_string()));
        assert!(!failed.is_valid());
        assert_eq!(failed.message(), "nope");
    }
}
