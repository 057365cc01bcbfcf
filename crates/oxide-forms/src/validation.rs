//! Single-purpose field validators.
//!
//! The field rules in [`crate::rules`] are assembled from these. Each
//! validator checks one property of an already-trimmed value and carries
//! the message shown to the user when the check fails. Lengths are
//! counted in characters, not bytes.

use regex::Regex;

use crate::error::Result;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value.
    ///
    /// # Errors
    ///
    /// Returns the message to show when the value fails the check.
    fn validate(&self, value: &str) -> std::result::Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` showing `message` on failure.
    #[must_use]
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` showing `message` on failure.
    #[must_use]
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new `RegexValidator`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::FormError::InvalidPattern`] when `pattern` does
    /// not compile.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for email addresses.
///
/// Accepts `local@domain.tld` shapes: no whitespace, exactly one `@`, and
/// at least one `.` after the `@` with text on both sides.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    inner: RegexValidator,
}

impl EmailValidator {
    const PATTERN: &'static str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

    /// Creates a new `EmailValidator` with the default message.
    ///
    /// # Errors
    ///
    /// Fails if the address pattern does not compile.
    pub fn new() -> Result<Self> {
        Self::with_message("Please enter a valid email address.")
    }

    /// Creates a new `EmailValidator` with a custom message.
    ///
    /// # Errors
    ///
    /// Fails if the address pattern does not compile.
    pub fn with_message(message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            inner: RegexValidator::new(Self::PATTERN, message)?,
        })
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        self.inner.validate(value)
    }

    fn message(&self) -> &str {
        self.inner.message()
    }
}

/// Validator requiring at least one lowercase letter, one uppercase letter
/// and one digit (ASCII).
#[derive(Debug, Clone)]
pub struct PasswordCompositionValidator {
    message: String,
}

impl PasswordCompositionValidator {
    /// Creates a new `PasswordCompositionValidator` with the default
    /// message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Password must contain at least one uppercase letter, \
                      one lowercase letter, and one number."
                .to_string(),
        }
    }
}

impl Default for PasswordCompositionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PasswordCompositionValidator {
    fn validate(&self, value: &str) -> std::result::Result<(), String> {
        let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());

        if has_lower && has_upper && has_digit {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("  \t ").is_err());
        assert_eq!(v.message(), "This field is required.");
    }

    #[test]
    fn test_max_length_counts_characters() {
        let v = MaxLengthValidator::with_message(3, "too long");
        assert!(v.validate("abc").is_ok());
        assert!(v.validate("äöü").is_ok());
        assert_eq!(v.validate("abcd"), Err("too long".to_string()));
        assert_eq!(v.message(), "too long");
    }

    #[test]
    fn test_min_length_validator() {
        let v = MinLengthValidator::with_message(3, "too short");
        assert!(v.validate("abc").is_ok());
        assert_eq!(v.validate("ab"), Err("too short".to_string()));
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator::new().unwrap();
        assert!(v.validate("user@example.com").is_ok());
        assert!(v.validate("user.name@domain.co.uk").is_ok());
        assert!(v.validate("invalid").is_err());
        assert!(v.validate("@example.com").is_err());
        assert!(v.validate("bob@@x").is_err());
        assert!(v.validate("bob@x").is_err());
        assert!(v.validate("bo b@x.org").is_err());
        assert!(v.validate("a@b@c.org").is_err());
    }

    #[test]
    fn test_regex_validator() {
        let v = RegexValidator::new(r"^[A-Za-z0-9_]+$", "bad characters").unwrap();
        assert!(v.validate("user_01").is_ok());
        assert!(v.validate("ab$").is_err());
    }

    #[test]
    fn test_regex_validator_rejects_bad_pattern() {
        assert!(RegexValidator::new(r"([", "never").is_err());
    }

    #[test]
    fn test_password_composition() {
        let v = PasswordCompositionValidator::new();
        assert!(v.validate("Abcdefg1").is_ok());
        assert!(v.validate("abcdefg1").is_err());
        assert!(v.validate("ABCDEFG1").is_err());
        assert!(v.validate("Abcdefgh").is_err());
    }
}
