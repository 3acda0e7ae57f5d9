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
    let limit = helpers::limit(eval, "minProperties", value)?;
    if let Value::Object(object) = eval.instance {
        if (object.len() as u64) < limit {
            result.push(eval.error("minProperties", ValidationErrorKind::MinProperties { limit }));
        }
    }
    Ok(())
}
