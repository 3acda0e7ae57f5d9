use super::{helpers, Evaluation, ValidationResult};
use crate::{error::SchemaError, evaluated::EvaluatedSet};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let properties = helpers::schema_map(eval, "properties", value)?;
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    let location = eval.location("properties");
    for (name, subschema) in properties {
        if let Some(child) = object.get(name) {
            let outcome = eval.descend(
                subschema,
                child,
                &eval.instance_location.join(name),
                &location.join(name),
                &mut EvaluatedSet::new(),
            )?;
            if outcome.is_valid() {
                evaluated.insert_property(name);
            } else {
                result.extend(outcome);
            }
        }
    }
    Ok(())
}
