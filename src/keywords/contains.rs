//! `contains` together with `minContains` and `maxContains`.
use super::{helpers, Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    schemas::Draft,
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Value::Array(items) = eval.instance else {
        return Ok(());
    };
    let bound = |keyword: &'static str| -> Result<Option<u64>, SchemaError> {
        if eval.ctx.draft < Draft::Draft201909 {
            return Ok(None);
        }
        eval.schema
            .get(keyword)
            .map(|value| helpers::limit(eval, keyword, value))
            .transpose()
    };
    let min = bound("minContains")?;
    let max = bound("maxContains")?;
    let location = eval.location("contains");
    let mut matched = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        let outcome = eval.descend(
            value,
            item,
            &eval.instance_location.join(idx),
            &location,
            &mut EvaluatedSet::new(),
        )?;
        if outcome.is_valid() {
            matched.push(idx);
        }
    }
    let count = matched.len() as u64;
    match min {
        Some(limit) if count < limit => {
            result.push(eval.error("minContains", ValidationErrorKind::MinContains { limit }))
        }
        None if count == 0 => result.push(eval.error("contains", ValidationErrorKind::Contains)),
        _ => {}
    }
    if let Some(limit) = max {
        if count > limit {
            result.push(eval.error("maxContains", ValidationErrorKind::MaxContains { limit }));
        }
    }
    if eval.ctx.draft >= Draft::Draft202012 {
        for idx in matched {
            evaluated.insert_item(idx);
        }
    }
    Ok(())
}
