use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    numeric::{self, Numeric},
};
use serde_json::Value;
use std::cmp::Ordering;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let limit = helpers::number(eval, "exclusiveMaximum", value)?;
    if let Value::Number(number) = eval.instance {
        if let Some(Ordering::Greater | Ordering::Equal) =
            numeric::compare(&Numeric::new(number), &limit)
        {
            result.push(eval.error(
                "exclusiveMaximum",
                ValidationErrorKind::ExclusiveMaximum {
                    limit: value.clone(),
                },
            ));
        }
    }
    Ok(())
}
