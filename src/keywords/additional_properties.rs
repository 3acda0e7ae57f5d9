//! `additionalProperties` covers the properties not matched by the sibling `properties` and
//! `patternProperties`.
use super::{helpers, Evaluation, ValidationResult};
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
    let properties = eval.schema.get("properties").and_then(Value::as_object);
    let patterns = match eval.schema.get("patternProperties").and_then(Value::as_object) {
        Some(patterns) => patterns
            .keys()
            .map(|pattern| eval.regex(pattern))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    let mut additional: Vec<&String> = Vec::new();
    for name in object.keys() {
        if properties.map_or(false, |properties| properties.contains_key(name)) {
            continue;
        }
        if !patterns.iter().any(|regex| {
            helpers::matches_property(eval, "additionalProperties", regex, name, result)
        }) {
            additional.push(name);
        }
    }
    if additional.is_empty() {
        return Ok(());
    }
    if let Value::Bool(false) = value {
        result.push(eval.error(
            "additionalProperties",
            ValidationErrorKind::AdditionalProperties {
                unexpected: additional.into_iter().cloned().collect(),
            },
        ));
        return Ok(());
    }
    let location = eval.location("additionalProperties");
    for name in additional {
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
