use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    primitive_type::PrimitiveType,
};
use serde_json::Value;

/// Only checked when the validator has a format checker, otherwise `format` is an annotation.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let format = value
        .as_str()
        .ok_or_else(|| eval.invalid_keyword("format", value))?;
    let Some(checker) = eval.ctx.formats else {
        return Ok(());
    };
    if !eval.instance.is_string() || !checker.supports(PrimitiveType::String, format) {
        return Ok(());
    }
    if let Some(message) = checker.check(PrimitiveType::String, format, eval.instance) {
        result.push(eval.error(
            "format",
            ValidationErrorKind::Format {
                format: format.to_string(),
                message,
            },
        ));
    }
    Ok(())
}
