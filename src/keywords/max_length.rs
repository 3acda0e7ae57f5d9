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
    let limit = helpers::limit(eval, "maxLength", value)?;
    if let Value::String(string) = eval.instance {
        if (string.encode_utf16().count() as u64) > limit {
            result.push(eval.error("maxLength", ValidationErrorKind::MaxLength { limit }));
        }
    }
    Ok(())
}
