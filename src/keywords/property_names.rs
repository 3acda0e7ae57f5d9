use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

/// Property names are validated as string instances located at the object itself.
pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    let location = eval.location("propertyNames");
    for name in object.keys() {
        let key = Value::String(name.clone());
        let outcome = eval.descend(
            value,
            &key,
            eval.instance_location,
            &location,
            &mut EvaluatedSet::new(),
        )?;
        if !outcome.is_valid() {
            let message = outcome
                .errors()
                .first()
                .map(|error| error.message().to_string())
                .unwrap_or_else(|| format!("{} is not a valid property name", key));
            result.push(eval.error(
                "propertyNames",
                ValidationErrorKind::PropertyNames { message },
            ));
        }
    }
    Ok(())
}
