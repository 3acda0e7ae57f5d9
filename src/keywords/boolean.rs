use super::ValidationResult;
use crate::{
    error::{ErrorUnit, ValidationErrorKind},
    paths::Location,
};
use serde_json::Value;

/// `true` accepts everything, `false` rejects everything.
#[inline]
pub(crate) fn validate(
    flag: bool,
    instance: &Value,
    instance_location: &Location,
    schema_location: &Location,
) -> ValidationResult {
    if flag {
        ValidationResult::success()
    } else {
        ValidationResult::failure(ErrorUnit::new(
            instance,
            ValidationErrorKind::FalseSchema,
            "false",
            instance_location,
            schema_location.clone(),
        ))
    }
}
