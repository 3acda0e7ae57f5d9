use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    // Whatever the negated schema evaluates does not count
    let mut discarded = evaluated.clone();
    let outcome = eval.descend(
        value,
        eval.instance,
        eval.instance_location,
        &eval.location("not"),
        &mut discarded,
    )?;
    if outcome.is_valid() {
        result.push(eval.error(
            "not",
            ValidationErrorKind::Not {
                schema: value.clone(),
            },
        ));
    }
    Ok(())
}
