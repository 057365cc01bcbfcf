//! # oxide-forms
//!
//! Client-side form field rules and password strength scoring.
//!
//! This crate provides:
//! - Composable single-purpose validators
//! - The field rules engine used before a form is submitted
//! - Password strength scoring and the strength meter lookup table
//! - Validation error aggregation
//!
//! Everything here is pure: no UI state, no I/O. The imperative feedback
//! layer lives in `oxide-feedback`.
//!
//! ## Validating Fields
//!
//! ```rust
//! use oxide_forms::{FieldContext, FieldValidator};
//!
//! let validator = FieldValidator::new().unwrap();
//!
//! let result = validator.validate(&FieldContext::new("username", "ab"), None);
//! assert!(!result.is_valid());
//! assert_eq!(result.message(), "Username must be at least 3 characters long.");
//!
//! // The confirmation is checked against the sibling password.
//! let confirm = FieldContext::new("password2", "x").required(true);
//! let result = validator.validate(&confirm, Some("y"));
//! assert_eq!(result.message(), "Passwords do not match.");
//! ```
//!
//! ## Password Strength
//!
//! ```rust
//! use oxide_forms::strength::score;
//!
//! let level = score("Abcdefg1");
//! assert_eq!(level.value(), 4);
//! assert_eq!(level.style().label, "Good");
//! assert_eq!(level.style().fill_percentage, 80);
//! ```

mod error;
mod fields;
pub mod rules;
pub mod strength;
pub mod validation;

pub use error::{FormError, Result, ValidationErrors};
pub use fields::{FieldContext, FieldKind, ValidationResult};
pub use rules::FieldValidator;
pub use strength::{score, MeterStyle, StrengthLevel};
