use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

#[inline]
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    if !helpers::equal(value, eval.instance) {
        result.push(eval.error(
            "const",
            ValidationErrorKind::Constant {
                expected_value: value.clone(),
            },
        ));
    }
    Ok(())
}
