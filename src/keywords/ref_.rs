//! `$ref`, `$recursiveRef` and `$dynamicRef`.
use super::{Evaluation, ValidationResult};
use crate::{
    error::{SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    node::{Annotation, SchemaNode},
    schemas::Draft,
};
use serde_json::Value;

pub(crate) fn validate<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let reference = value
        .as_str()
        .ok_or_else(|| eval.invalid_keyword("$ref", value))?;
    let index = eval.ctx.index;
    let uri = index
        .annotation(&SchemaNode::Object(eval.schema), Annotation::AbsoluteRef)
        .unwrap_or(reference);
    let target = index.resolve(uri)?;
    apply(eval, "$ref", uri, target, evaluated, result)
}

/// `$recursiveRef` in 2019-09, `$dynamicRef` in 2020-12.
pub(crate) fn validate_recursive<'a>(
    eval: &Evaluation<'_, 'a>,
    value: &'a Value,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let keyword = if eval.ctx.draft == Draft::Draft201909 {
        "$recursiveRef"
    } else {
        "$dynamicRef"
    };
    let reference = value
        .as_str()
        .ok_or_else(|| eval.invalid_keyword(keyword, value))?;
    let index = eval.ctx.index;
    let uri = index
        .annotation(
            &SchemaNode::Object(eval.schema),
            Annotation::AbsoluteRecursiveRef,
        )
        .unwrap_or(reference);
    let initial = index.resolve(uri)?;
    let target = if reference == "#" && initial.flag("$recursiveAnchor") {
        eval.scope.recursive_anchor.unwrap_or(initial)
    } else if keyword == "$dynamicRef" {
        dynamic_target(eval, uri).unwrap_or(initial)
    } else {
        initial
    };
    apply(eval, keyword, uri, target, evaluated, result)
}

/// The outermost resource in the dynamic scope that declares the same `$dynamicAnchor`.
fn dynamic_target<'a>(eval: &Evaluation<'_, 'a>, uri: &str) -> Option<SchemaNode<'a>> {
    let index = eval.ctx.index;
    if !index.is_dynamic_anchor(uri) {
        return None;
    }
    let (_, anchor) = uri.split_once('#')?;
    eval.scope.resources().into_iter().find_map(|resource| {
        let candidate = format!("{}#{}", resource, anchor);
        if index.is_dynamic_anchor(&candidate) {
            index.get(&candidate)
        } else {
            None
        }
    })
}

fn apply<'a>(
    eval: &Evaluation<'_, 'a>,
    keyword: &'static str,
    uri: &str,
    target: SchemaNode<'a>,
    evaluated: &mut EvaluatedSet,
    result: &mut ValidationResult,
) -> Result<(), SchemaError> {
    tracing::trace!(
        keyword,
        from = %eval.schema_location,
        to = uri,
        "Following reference"
    );
    let mut branch = evaluated.clone();
    let outcome = eval.follow(uri, target, &eval.location(keyword), &mut branch)?;
    if outcome.is_valid() {
        evaluated.merge(branch);
    } else {
        result.push(eval.error(
            keyword,
            ValidationErrorKind::Reference {
                reference: uri.to_string(),
            },
        ));
        result.extend(outcome);
    }
    Ok(())
}
