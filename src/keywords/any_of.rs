use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

/// Every alternative is evaluated, so that all matching ones contribute evaluated properties
/// and items.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let schemas = helpers::schema_array(eval, "anyOf", value)?;
    let scope = eval.alternatives_scope();
    let location = eval.location("anyOf");
    let incoming = evaluated.clone();
    let mut failures = ValidationResult::success();
    let mut matched = false;
    for (idx, schema) in schemas.iter().enumerate() {
        let mut branch = incoming.clone();
        let outcome = eval.descend_in(
            scope,
            schema,
            eval.instance,
            eval.instance_location,
            &location.join(idx),
            &mut branch,
        )?;
        if outcome.is_valid() {
            matched = true;
            evaluated.merge(branch);
        } else {
            failures.extend(outcome);
        }
    }
    if !matched {
        result.push(eval.error("anyOf", ValidationErrorKind::AnyOf));
        result.extend(failures);
    }
    Ok(())
}
