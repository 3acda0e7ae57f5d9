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
    let unique = value
        .as_bool()
        .ok_or_else(|| eval.invalid_keyword("uniqueItems", value))?;
    if let Value::Array(items) = eval.instance {
        if unique && !is_unique(items) {
            result.push(eval.error("uniqueItems", ValidationErrorKind::UniqueItems));
        }
    }
    Ok(())
}

/// Pairwise comparison, since numerically equal values may differ in representation.
pub(crate) fn is_unique(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(idx, item)| items[idx + 1..].iter().all(|other| !helpers::equal(item, other)))
}

#[cfg(test)]
mod tests {
    use super::is_unique;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!([1, 2, 3]), true)]
    #[test_case(json!([1, 1.0]), false)]
    #[test_case(json!([{"a": 1}, {"a": 1}]), false)]
    #[test_case(json!([[1], [true]]), true)]
    #[test_case(json!([]), true)]
    fn uniqueness(items: Value, expected: bool) {
        let items = items.as_array().expect("An array").clone();
        assert_eq!(is_unique(&items), expected)
    }
}
