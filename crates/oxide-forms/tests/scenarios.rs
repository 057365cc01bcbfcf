//! End-to-end field scenarios.

use oxide_forms::{score, FieldContext, FieldValidator, ValidationResult};

fn validate(name: &str, value: &str, password: Option<&str>) -> ValidationResult {
    let validator = FieldValidator::new().expect("rule set compiles");
    validator.validate(&FieldContext::new(name, value).required(true), password)
}

#[test]
fn test_short_username() {
    let result = validate("username", "ab", None);
    assert!(!result.is_valid());
    assert_eq!(result.message(), "Username must be at least 3 characters long.");
}

#[test]
fn test_username_with_invalid_characters() {
    let result = validate("username", "ab$", None);
    assert!(!result.is_valid());
    assert_eq!(
        result.message(),
        "Username can only contain letters, numbers, and underscores."
    );
}

#[test]
fn test_email_with_two_at_signs() {
    let result = validate("email", "bob@@x", None);
    assert_eq!(result.message(), "Please enter a valid email address.");
}

#[test]
fn test_acceptable_password_scores_good() {
    let result = validate("password", "Abcdefg1", None);
    assert!(result.is_valid());
    assert_eq!(result.message(), "");

    let level = score("Abcdefg1");
    assert_eq!(level.value(), 4);
    assert_eq!(level.style().label, "Good");
}

#[test]
fn test_mismatched_confirmation() {
    let result = validate("password2", "x", Some("y"));
    assert_eq!(result.message(), "Passwords do not match.");
}

#[test]
fn test_bio_boundary() {
    let too_long = validate("bio", &"b".repeat(501), None);
    assert_eq!(too_long.message(), "Bio must be 500 characters or less.");

    let at_limit = validate("bio", &"b".repeat(500), None);
    assert!(at_limit.is_valid());
}

#[test]
fn test_results_serialize_for_reporting() {
    let result = validate("username", "ab", None);
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["valid"], serde_json::json!(false));
    assert_eq!(
        json["message"],
        "Username must be at least 3 characters long."
    );
}
