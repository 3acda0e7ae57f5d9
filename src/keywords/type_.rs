use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, TypeKind, ValidationErrorKind},
    evaluated::EvaluatedSet,
    numeric::Numeric,
    primitive_type::{PrimitiveType, PrimitiveTypesBitMap},
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    _: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let (types, kind) = match value {
        Value::String(name) => {
            let primitive_type = parse(eval, name, value)?;
            let mut types = PrimitiveTypesBitMap::new();
            types |= primitive_type;
            (types, TypeKind::Single(primitive_type))
        }
        Value::Array(names) => {
            let mut types = PrimitiveTypesBitMap::new();
            for name in names {
                let name = name
                    .as_str()
                    .ok_or_else(|| eval.invalid_keyword("type", value))?;
                types |= parse(eval, name, value)?;
            }
            (types, TypeKind::Multiple(types.iter().collect()))
        }
        _ => return Err(eval.invalid_keyword("type", value)),
    };
    if !is_of_type(types, eval.instance) {
        result.push(eval.error("type", ValidationErrorKind::Type { kind }));
    }
    Ok(())
}

fn parse(
    eval: &Evaluation<'_, '_>,
    name: &str,
    value: &Value,
) -> Result<PrimitiveType, SchemaError> {
    PrimitiveType::try_from(name).map_err(|_| eval.invalid_keyword("type", value))
}

/// Any number with a zero fractional part is an integer, `1.0` included.
fn is_of_type(types: PrimitiveTypesBitMap, instance: &Value) -> bool {
    match instance {
        Value::Number(number) => {
            types.contains(PrimitiveType::Number)
                || (types.contains(PrimitiveType::Integer) && Numeric::new(number).is_integer())
        }
        _ => types.contains(PrimitiveType::of(instance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn types(names: &[PrimitiveType]) -> PrimitiveTypesBitMap {
        let mut types = PrimitiveTypesBitMap::new();
        for name in names {
            types |= *name;
        }
        types
    }

    #[test_case(json!(1.0), true)]
    #[test_case(json!(1), true)]
    #[test_case(json!(-3.0), true)]
    #[test_case(json!(1e3), true)]
    #[test_case(json!(1.5), false)]
    #[test_case(json!("1"), false)]
    fn integers(instance: Value, expected: bool) {
        assert_eq!(
            is_of_type(types(&[PrimitiveType::Integer]), &instance),
            expected
        )
    }

    #[test]
    fn numbers_include_integers() {
        let types = types(&[PrimitiveType::Number]);
        assert!(is_of_type(types, &json!(3)));
        assert!(!is_of_type(types, &json!(null)));
    }
}
