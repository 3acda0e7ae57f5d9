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
    let schemas = helpers::schema_array(eval, "oneOf", value)?;
    let scope = eval.alternatives_scope();
    let location = eval.location("oneOf");
    let mut failures = ValidationResult::success();
    let mut matched: Option<EvaluatedSet> = None;
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
            if matched.is_some() {
                result.push(eval.error("oneOf", ValidationErrorKind::OneOfMultipleValid));
                return Ok(());
            }
            matched = Some(branch);
        } else {
            failures.extend(outcome);
        }
    }
    match matched {
        Some(branch) => evaluated.merge(branch),
        None => {
            result.push(eval.error("oneOf", ValidationErrorKind::OneOfNotValid));
            result.extend(failures);
        }
    }
    Ok(())
}
