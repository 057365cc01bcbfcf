//! Property tests for scoring and validation.

use oxide_forms::strength::{score, StrengthCriterion, MAX_STRENGTH};
use oxide_forms::{FieldContext, FieldValidator};
use proptest::prelude::*;

fn field_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("username"),
        Just("email"),
        Just("password"),
        Just("password2"),
        Just("bio"),
        Just("title"),
    ]
}

proptest! {
    #[test]
    fn test_score_is_bounded(password in ".{0,64}") {
        prop_assert!(score(&password).value() <= MAX_STRENGTH);
    }

    #[test]
    fn test_score_counts_met_criteria(password in ".{0,64}") {
        let met = StrengthCriterion::ALL
            .into_iter()
            .filter(|c| c.is_met(&password))
            .count();
        prop_assert_eq!(usize::from(score(&password).value()), met);
    }

    #[test]
    fn test_appending_characters_never_lowers_score(
        password in ".{0,32}",
        suffix in prop_oneof![Just("1"), Just("a"), Just("Z"), Just("!"), Just("xxxxxxxx")],
    ) {
        let extended = format!("{password}{suffix}");
        prop_assert!(score(&extended) >= score(&password));
    }

    #[test]
    fn test_validation_is_pure(
        name in field_name(),
        value in ".{0,40}",
        required in any::<bool>(),
        sibling in proptest::option::of(".{0,12}"),
    ) {
        let validator = FieldValidator::new().unwrap();
        let field = FieldContext::new(name, value).required(required);
        let first = validator.validate(&field, sibling.as_deref());
        let second = validator.validate(&field, sibling.as_deref());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.is_valid(), first.message().is_empty());
    }
}
