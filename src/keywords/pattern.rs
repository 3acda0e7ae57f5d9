use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

/// The pattern may match anywhere in the string.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let pattern = value
        .as_str()
        .ok_or_else(|| eval.invalid_keyword("pattern", value))?;
    let regex = eval.regex(pattern)?;
    if let Value::String(string) = eval.instance {
        match regex.is_match(string) {
            Ok(true) => {}
            Ok(false) => result.push(eval.error(
                "pattern",
                ValidationErrorKind::Pattern {
                    pattern: pattern.to_string(),
                },
            )),
            Err(error) => result.push(eval.error(
                "pattern",
                ValidationErrorKind::BacktrackLimitExceeded {
                    error: error.to_string(),
                },
            )),
        }
    }
    Ok(())
}
