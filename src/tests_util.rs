use crate::{ErrorUnit, Validator};
use serde_json::Value;

fn build(schema: &Value) -> Validator<'_> {
    Validator::new(schema).expect("Invalid schema")
}

fn errors(schema: &Value, instance: &Value) -> Vec<ErrorUnit> {
    build(schema)
        .apply(instance)
        .expect("Schema errors during validation")
        .into_errors()
}

#[track_caller]
pub(crate) fn is_valid(schema: &Value, instance: &Value) {
    let validator = build(schema);
    let result = validator.apply(instance).expect("Schema errors during validation");
    assert!(
        result.is_valid(),
        "{} should be valid (via apply), got {:?}",
        instance,
        result.errors()
    );
    assert!(
        validator.validate(instance).expect("No schema errors").is_valid(),
        "{} should be valid (via validate)",
        instance
    );
}

#[track_caller]
pub(crate) fn is_not_valid(schema: &Value, instance: &Value) {
    let validator = build(schema);
    let result = validator.apply(instance).expect("Schema errors during validation");
    assert!(!result.is_valid(), "{} should not be valid (via apply)", instance);
    assert!(
        !result.errors().is_empty(),
        "{} should report at least one error",
        instance
    );
    assert!(
        !validator.is_valid(instance).expect("No schema errors"),
        "{} should not be valid (via is_valid)",
        instance
    );
}

#[track_caller]
pub(crate) fn assert_keyword_location(schema: &Value, instance: &Value, expected: &str) {
    let errors = errors(schema, instance);
    assert!(
        errors
            .iter()
            .any(|error| error.keyword_location().as_str() == expected),
        "No error at {} in {:?}",
        expected,
        errors
    );
}

#[track_caller]
pub(crate) fn assert_instance_location(schema: &Value, instance: &Value, expected: &str) {
    let errors = errors(schema, instance);
    assert!(
        errors
            .iter()
            .any(|error| error.instance_location().as_str() == expected),
        "No error for the instance at {} in {:?}",
        expected,
        errors
    );
}
