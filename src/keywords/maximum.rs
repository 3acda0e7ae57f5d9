use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    numeric::{self, Numeric},
    schemas::Draft,
};
use serde_json::Value;
use std::cmp::Ordering;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let limit = helpers::number(eval, "maximum", value)?;
    let Value::Number(number) = eval.instance else {
        return Ok(());
    };
    let exclusive = eval.ctx.draft == Draft::Draft4
        && eval.schema.get("exclusiveMaximum") == Some(&Value::Bool(true));
    let kind = match numeric::compare(&Numeric::new(number), &limit) {
        Some(Ordering::Greater) | Some(Ordering::Equal) if exclusive => {
            ValidationErrorKind::ExclusiveMaximum {
                limit: value.clone(),
            }
        }
        Some(Ordering::Greater) => ValidationErrorKind::Maximum {
            limit: value.clone(),
        },
        _ => return Ok(()),
    };
    result.push(eval.error("maximum", kind));
    Ok(())
}
