use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let options = value
        .as_array()
        .ok_or_else(|| eval.invalid_keyword("enum", value))?;
    if !options
        .iter()
        .any(|option| helpers::equal(option, eval.instance))
    {
        result.push(eval.error(
            "enum",
            ValidationErrorKind::Enum {
                options: value.clone(),
            },
        ));
    }
    Ok(())
}
