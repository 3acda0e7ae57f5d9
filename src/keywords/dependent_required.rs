use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
};
use serde_json::{Map, Value};

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let dependencies = helpers::schema_map(eval, "dependentRequired", value)?;
    let Value::Object(object) = eval.instance else {
        return Ok(());
    };
    for (property, names) in dependencies {
        if object.contains_key(property) {
            let names = helpers::string_array(eval, "dependentRequired", names)?;
            require(eval, "dependentRequired", object, property, &names, result);
        }
    }
    Ok(())
}

/// Report every name in `names` that `object` lacks.
pub(crate) fn require(
    eval: &Evaluation<'_, '_>,
    keyword: &'static str,
    object: &Map<String, Value>,
    property: &str,
    names: &[&str],
    result: &mut ValidationResult,
) {
    for name in names {
        if !object.contains_key(*name) {
            result.push(eval.error(
                keyword,
                ValidationErrorKind::DependentRequired {
                    property: property.to_string(),
                    dependency: name.to_string(),
                },
            ));
        }
    }
}
