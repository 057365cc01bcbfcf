//! Field rules engine.
//!
//! Rules are checked in a fixed precedence and the first failure wins:
//!
//! 1. required fields must not be blank;
//! 2. `email` must look like `local@domain.tld`;
//! 3. `username` must have at least 3 characters, then only letters,
//!    digits and underscores;
//! 4. `password` must have at least 8 characters, then mixed case and a
//!    digit;
//! 5. `password2` must equal the sibling `password`;
//! 6. `bio` must not exceed 500 characters.
//!
//! Presence, length and pattern checks look at the trimmed value. The
//! confirmation check compares the raw values of both password fields.

use tracing::debug;

use crate::error::{Result, ValidationErrors};
use crate::fields::{FieldContext, FieldKind, ValidationResult};
use crate::validation::{
    EmailValidator, MaxLengthValidator, MinLengthValidator, PasswordCompositionValidator,
    RegexValidator, RequiredValidator, Validator,
};

/// Minimum username length.
pub const USERNAME_MIN_LENGTH: usize = 3;
/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Maximum bio length.
pub const BIO_MAX_LENGTH: usize = 500;

/// Message shown when the confirmation differs from the password.
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

/// Validates individual fields against the built-in rule set.
///
/// Construction compiles the patterns once; validation itself is a pure
/// function of its inputs.
pub struct FieldValidator {
    required: RequiredValidator,
    email: EmailValidator,
    username: Vec<Box<dyn Validator>>,
    password: Vec<Box<dyn Validator>>,
    bio: MaxLengthValidator,
}

impl std::fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldValidator")
            .field("username_rules", &self.username.len())
            .field("password_rules", &self.password.len())
            .finish_non_exhaustive()
    }
}

impl FieldValidator {
    /// Builds the rule set.
    ///
    /// # Errors
    ///
    /// Fails if one of the built-in patterns does not compile.
    pub fn new() -> Result<Self> {
        let username: Vec<Box<dyn Validator>> = vec![
            Box::new(MinLengthValidator::with_message(
                USERNAME_MIN_LENGTH,
                "Username must be at least 3 characters long.",
            )),
            Box::new(RegexValidator::new(
                r"^[A-Za-z0-9_]+$",
                "Username can only contain letters, numbers, and underscores.",
            )?),
        ];

        let password: Vec<Box<dyn Validator>> = vec![
            Box::new(MinLengthValidator::with_message(
                PASSWORD_MIN_LENGTH,
                "Password must be at least 8 characters long.",
            )),
            Box::new(PasswordCompositionValidator::new()),
        ];

        Ok(Self {
            required: RequiredValidator::new(),
            email: EmailValidator::new()?,
            username,
            password,
            bio: MaxLengthValidator::with_message(
                BIO_MAX_LENGTH,
                "Bio must be 500 characters or less.",
            ),
        })
    }

    /// Validates one field.
    ///
    /// `password` is the raw value of the `password` field of the same
    /// form; it is only consulted for `password2`. When it is `None` the
    /// confirmation rule does not fire.
    #[must_use]
    pub fn validate(&self, field: &FieldContext, password: Option<&str>) -> ValidationResult {
        let result: ValidationResult = self.check(field, password).into();
        debug!(field = %field.name, ?result, "validated field");
        result
    }

    fn check(
        &self,
        field: &FieldContext,
        password: Option<&str>,
    ) -> std::result::Result<(), String> {
        let value = field.trimmed();

        if field.required {
            self.required.validate(value)?;
        }

        match field.kind {
            FieldKind::Email if !value.is_empty() => self.email.validate(value),
            FieldKind::Username if !value.is_empty() => run_all(&self.username, value),
            FieldKind::Password if !value.is_empty() => run_all(&self.password, value),
            FieldKind::PasswordConfirmation if !value.is_empty() => match password {
                Some(password) if password != field.value => {
                    Err(PASSWORDS_DO_NOT_MATCH.to_string())
                }
                _ => Ok(()),
            },
            FieldKind::Bio => self.bio.validate(value),
            _ => Ok(()),
        }
    }

    /// Validates every field of a form and collects the failures by name.
    #[must_use]
    pub fn validate_all(
        &self,
        fields: &[FieldContext],
        password: Option<&str>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in fields {
            let result = self.validate(field, password);
            if !result.is_valid() {
                errors.add(&field.name, result.message());
            }
        }
        errors
    }
}

fn run_all(validators: &[Box<dyn Validator>], value: &str) -> std::result::Result<(), String> {
    validators.iter().try_for_each(|v| v.validate(value))
}
