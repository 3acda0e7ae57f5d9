use super::{helpers, Evaluation, ValidationResult};
use crate::{error::SchemaError, evaluated::EvaluatedSet};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let patterns = helpers::schema_map(eval, "patternProperties", value)?;
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    let location = eval.location("patternProperties");
    for (pattern, subschema) in patterns {
        let regex = eval.regex(pattern)?;
        for (name, child) in object {
            if !helpers::matches_property(eval, "patternProperties", &regex, name, result) {
                continue;
            }
            let outcome = eval.descend(
                subschema,
                child,
                &eval.instance_location.join(name),
                &location.join(pattern),
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
