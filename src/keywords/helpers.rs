use super::{Evaluation, ValidationResult};
use crate::{
    error::{ErrorUnit, SchemaError, ValidationErrorKind},
    numeric::{self, Numeric},
};
use fancy_regex::Regex;
use serde_json::{Map, Value};

/// JSON equality where numbers compare by value, so `1` equals `1.0`.
#[inline]
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => numeric::equal(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => left == right,
    }
}

#[inline]
pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right.iter()).all(|(a, b)| equal(a, b))
}

#[inline]
pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left.iter().all(|(key, value)| {
            right
                .get(key)
                .map_or(false, |other| equal(value, other))
        })
}

/// A non-negative integer keyword value, such as `maxLength`. `2.0` is accepted as `2`.
pub(crate) fn limit(
    eval: &Evaluation<'_, '_>,
    keyword: &'static str,
    value: &Value,
) -> Result<u64, SchemaError> {
    if let Some(limit) = value.as_u64() {
        return Ok(limit);
    }
    match value.as_f64() {
        Some(limit) if limit >= 0.0 && limit.fract() == 0.0 && limit <= u64::MAX as f64 => {
            Ok(limit as u64)
        }
        _ => Err(eval.invalid_keyword(keyword, value)),
    }
}

pub(crate) fn number(
    eval: &Evaluation<'_, '_>,
    keyword: &'static str,
    value: &Value,
) -> Result<Numeric, SchemaError> {
    match value {
        Value::Number(number) => Ok(Numeric::new(number)),
        _ => Err(eval.invalid_keyword(keyword, value)),
    }
}

/// Subschemas of `allOf`, `anyOf`, `oneOf` and friends.
pub(crate) fn schema_array<'a>(
    eval: &Evaluation<'_, 'a>,
    keyword: &'static str,
    value: &'a Value,
) -> Result<&'a [Value], SchemaError> {
    match value {
        Value::Array(schemas) if !schemas.is_empty() => Ok(schemas),
        _ => Err(eval.invalid_keyword(keyword, value)),
    }
}

pub(crate) fn schema_map<'a>(
    eval: &Evaluation<'_, 'a>,
    keyword: &'static str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| eval.invalid_keyword(keyword, value))
}

/// A list of property names, as in `required`.
pub(crate) fn string_array<'a>(
    eval: &Evaluation<'_, '_>,
    keyword: &'static str,
    value: &'a Value,
) -> Result<Vec<&'a str>, SchemaError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| eval.invalid_keyword(keyword, value)))
            .collect(),
        _ => Err(eval.invalid_keyword(keyword, value)),
    }
}

/// Whether `regex` matches the property `name`.
///
/// A pattern that can't be evaluated against the name is reported at that property and counts
/// as no match.
pub(crate) fn matches_property(
    eval: &Evaluation<'_, '_>,
    keyword: &'static str,
    regex: &Regex,
    name: &str,
    result: &mut ValidationResult,
) -> bool {
    match regex.is_match(name) {
        Ok(matched) => matched,
        Err(error) => {
            result.push(ErrorUnit::new(
                eval.instance,
                ValidationErrorKind::BacktrackLimitExceeded {
                    error: error.to_string(),
                },
                keyword,
                &eval.instance_location.join(name),
                eval.location(keyword),
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::equal;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!(1), json!(1.0), true)]
    #[test_case(json!([1, {"a": 2}]), json!([1.0, {"a": 2.0}]), true)]
    #[test_case(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1}), true)]
    #[test_case(json!({"a": 1}), json!({"a": 1, "b": 2}), false)]
    #[test_case(json!("1"), json!(1), false)]
    #[test_case(json!(false), json!(0), false)]
    #[test_case(json!([1, 2]), json!([2, 1]), false)]
    fn deep_equality(left: Value, right: Value, expected: bool) {
        assert_eq!(equal(&left, &right), expected);
        assert_eq!(equal(&right, &left), expected);
    }
}
