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
    let divisor = helpers::number(eval, "multipleOf", value)?;
    if numeric::compare(&divisor, &Numeric::Unsigned(0)) != Some(Ordering::Greater) {
        return Err(eval.invalid_keyword("multipleOf", value));
    }
    if let Value::Number(number) = eval.instance {
        if !numeric::is_multiple_of(&Numeric::new(number), &divisor) {
            result.push(eval.error(
                "multipleOf",
                ValidationErrorKind::MultipleOf {
                    multiple_of: value.clone(),
                },
            ));
        }
    }
    Ok(())
}
