use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let required = helpers::string_array(eval, "required", value)?;
    if let Value::Object(object) = eval.instance {
        for property in required {
            if !object.contains_key(property) {
                result.push(eval.error(
                    "required",
                    ValidationErrorKind::Required {
                        property: property.to_string(),
                    },
                ));
            }
        }
    }
    Ok(())
}
