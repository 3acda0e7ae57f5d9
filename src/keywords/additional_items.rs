use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

/// Only meaningful next to an array-valued `items`.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(Value::Array(schemas)) = eval.schema.get("items") else {
        return Ok(());
    };
    let Value::Array(items) = eval.instance else {
        return Ok(());
    };
    let limit = schemas.len();
    if items.len() <= limit {
        return Ok(());
    }
    if let Value::Bool(false) = value {
        result.push(eval.error(
            "additionalItems",
            ValidationErrorKind::AdditionalItems { limit },
        ));
        return Ok(());
    }
    let location = eval.location("additionalItems");
    for (idx, item) in items.iter().enumerate().skip(limit) {
        let outcome = eval.descend(
            value,
            item,
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
