use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    numeric::{self, Numeric},
    schemas::Draft,
};
use serde_json::Value;
use std::cmp::Ordering;

/// In Draft 4 a boolean `exclusiveMinimum` turns `minimum` into a strict bound.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let limit = helpers::number(eval, "minimum", value)?;
    let Value::Number(number) = eval.instance else {
        return Ok(());
    };
    let exclusive = eval.ctx.draft == Draft::Draft4
        && eval.schema.get("exclusiveMinimum") == Some(&Value::Bool(true));
    match numeric::compare(&Numeric::new(number), &limit) {
        Some(Ordering::Less | Ordering::Equal) if exclusive => result.push(eval.error(
            "minimum",
            ValidationErrorKind::ExclusiveMinimum {
                limit: value.clone(),
            },
        )),
        Some(Ordering::Less) => result.push(eval.error(
            "minimum",
            ValidationErrorKind::Minimum {
                limit: value.clone(),
            },
        )),
        _ => {}
    }
    Ok(())
}
