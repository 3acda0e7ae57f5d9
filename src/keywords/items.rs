//! `prefixItems` and `items`.
//!
//! Up to 2019-09 an array value of `items` validates items by position, in 2020-12 that is the
//! job of `prefixItems` and `items` applies to the items after them.
use super::{Evaluation, ValidationResult};
use crate::{error::SchemaError, evaluated::EvaluatedSet, schemas::Draft};
use serde_json::Value;

pub(crate) fn validate_prefix<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let schemas = value
        .as_array()
        .ok_or_else(|| eval.invalid_keyword("prefixItems", value))?;
    positional(eval, "prefixItems", schemas, evaluated, result)
}

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    if let Value::Array(schemas) = value {
        return positional(eval, "items", schemas, evaluated, result);
    }
    let Value::Array(items) = eval.instance else {
        return Ok(());
    };
    let start = if eval.ctx.draft >= Draft::Draft202012 {
        eval.schema
            .get("prefixItems")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    } else {
        0
    };
    let location = eval.location("items");
    for (idx, item) in items.iter().enumerate().skip(start) {
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

fn positional<'a>(
    eval: &Evaluation<'_, 'a>,
    keyword: &'static str,
    schemas: &'a [Value],
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Value::Array(items) = eval.instance else {
        return Ok(());
    };
    let location = eval.location(keyword);
    for (idx, (schema, item)) in schemas.iter().zip(items).enumerate() {
        let outcome = eval.descend(
            schema,
            item,
            &eval.instance_location.join(idx),
            &location.join(idx),
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
