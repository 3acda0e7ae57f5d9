use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

/// `if` picks between the sibling `then` and `else`. Properties and items evaluated by `if`
/// count as evaluated whatever its outcome.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let mut branch = evaluated.clone();
    let condition = eval.descend(
        value,
        eval.instance,
        eval.instance_location,
        &eval.location("if"),
        &mut branch,
    )?;
    evaluated.merge(branch);
    let (keyword, kind) = if condition.is_valid() {
        ("then", ValidationErrorKind::IfThen)
    } else {
        ("else", ValidationErrorKind::IfElse)
    };
    if let Some(subschema) = eval.schema.get(keyword) {
        let mut branch = evaluated.clone();
        let outcome = eval.descend(
            subschema,
            eval.instance,
            eval.instance_location,
            &eval.location(keyword),
            &mut branch,
        )?;
        if outcome.is_valid() {
            evaluated.merge(branch);
        } else {
            result.push(eval.error("if", kind));
            result.extend(outcome);
        }
    }
    Ok(())
}
