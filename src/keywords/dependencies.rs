//! `dependencies` up to Draft 7 and its schema half, `dependentSchemas`, since 2019-09.
use super::{dependent_required, helpers, Evaluation, ValidationResult};
use crate::{error::SchemaError, evaluated::EvaluatedSet};
use serde_json::Value;

/// Arrays list required properties, anything else is a schema.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let dependencies = helpers::schema_map(eval, "dependencies", value)?;
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    for (property, dependency) in dependencies {
        if !object.contains_key(property) {
            continue;
        }
        if dependency.is_array() {
            let names = helpers::string_array(eval, "dependencies", dependency)?;
            dependent_required::require(eval, "dependencies", object, property, &names, result);
        } else {
            apply(eval, "dependencies", property, dependency, evaluated, result)?;
        }
    }
    Ok(())
}

pub(crate) fn validate_schemas<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let dependencies = helpers::schema_map(eval, "dependentSchemas", value)?;
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    for (property, dependency) in dependencies {
        if object.contains_key(property) {
            apply(eval, "dependentSchemas", property, dependency, evaluated, result)?;
        }
    }
    Ok(())
}

fn apply<'a>(
    eval: &Evaluation<'_, 'a>,
    keyword: &'static str,
    property: &str,
    subschema: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let mut branch = evaluated.clone();
    let outcome = eval.descend(
        subschema,
        eval.instance,
        eval.instance_location,
        &eval.location(keyword).join(property),
        &mut branch,
    )?;
    if outcome.is_valid() {
        evaluated.merge(branch);
    } else {
        result.extend(outcome);
    }
    Ok(())
}
