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
    let schemas = helpers::schema_array(eval, "allOf", value)?;
    let scope = eval.alternatives_scope();
    let location = eval.location("allOf");
    let mut branches = Vec::with_capacity(schemas.len());
    let mut failures = ValidationResult::success();
    for (idx, schema) in schemas.iter().enumerate() {
        let mut branch = evaluated.clone();
        let outcome = eval.descend_in(
            scope,
            schema,
            eval.instance,
            eval.instance_location,
            &location.join(idx),
            &mut branch,
        )?;
        if outcome.is_valid() {
            branches.push(branch);
        } else {
            failures.extend(outcome);
            if eval.ctx.short_circuit {
                break;
            }
        }
    }
    if failures.is_valid() {
        for branch in branches {
            evaluated.merge(branch);
        }
    } else {
        result.push(eval.error("allOf", ValidationErrorKind::AllOf));
        result.extend(failures);
    }
    Ok(())
}
