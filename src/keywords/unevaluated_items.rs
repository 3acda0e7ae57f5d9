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
    let Value::Array(items) = eval.instance else {
        return Ok(());
    };
    let remaining: Vec<usize> = (0..items.len())
        .filter(|idx| !evaluated.contains_item(*idx))
        .collect();
    if remaining.is_empty() {
        return Ok(());
    }
    if let Value::Bool(false) = value {
        result.push(eval.error(
            "unevaluatedItems",
            ValidationErrorKind::UnevaluatedItems {
                unexpected: remaining,
            },
        ));
        return Ok(());
    }
    let location = eval.location("unevaluatedItems");
    for idx in remaining {
        let outcome = eval.descend(
            value,
            &items[idx],
            &eval.instance_location.join(idx),
            &location,
            &mut EvaluatedSet::new(),
        )?;
        if outcome.is_valid() {
            evaluated.insert_item(idx);
        } else {
            result.extend(outcome);
        }
    }
    Ok(())
}
