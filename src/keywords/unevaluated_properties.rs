//! `unevaluatedProperties` sees what every other keyword of the schema and its in-place
//! applicators left unevaluated.
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
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    let remaining: Vec<&String> = object
        .keys()
        .filter(|name| !evaluated.contains_property(name))
        .collect();
    if remaining.is_empty() {
        return Ok(());
    }
    if let Value::Bool(false) = value {
        result.push(eval.error(
            "unevaluatedProperties",
            ValidationErrorKind::UnevaluatedProperties {
                unexpected: remaining.into_iter().cloned().collect(),
            },
        ));
        return Ok(());
    }
    let location = eval.location("unevaluatedProperties");
    for name in remaining {
        let outcome = eval.descend(
            value,
            &object[name],
            &eval.instance_location.join(name),
            &location,
            &mut EvaluatedSet::new(),
        )?;
        if outcome.is_valid() {
            evaluated.insert_property(name);
        } else {
            result.extend(outcome);
        }
    }
    Ok(())
}
