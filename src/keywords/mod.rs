//! Recursive validation of instances against indexed schemas.
//!
//! Each keyword lives in its own module and exposes a `validate` function with the same shape:
//! it receives the current [`Evaluation`], the keyword value, the evaluated-set of the current
//! instance and the result to append errors to.
pub(crate) mod additional_items;
pub(crate) mod additional_properties;
pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod boolean;
pub(crate) mod const_;
pub(crate) mod contains;
pub(crate) mod dependencies;
pub(crate) mod dependent_required;
pub(crate) mod enum_;
pub(crate) mod exclusive_maximum;
pub(crate) mod exclusive_minimum;
pub(crate) mod format;
pub(crate) mod helpers;
pub(crate) mod if_;
pub(crate) mod items;
pub(crate) mod max_items;
pub(crate) mod max_length;
pub(crate) mod max_properties;
pub(crate) mod maximum;
pub(crate) mod min_items;
pub(crate) mod min_length;
pub(crate) mod min_properties;
pub(crate) mod minimum;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod pattern_properties;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod ref_;
pub(crate) mod required;
pub(crate) mod type_;
pub(crate) mod unevaluated_items;
pub(crate) mod unevaluated_properties;
pub(crate) mod unique_items;

use crate::{
    ecma::RegexCache,
    error::{ErrorUnit, SchemaError, ValidationErrorKind},
    evaluated::EvaluatedSet,
    formats::FormatChecker,
    index::SchemaIndex,
    node::{Annotation, SchemaNode},
    paths::{Location, LocationSegment},
    schemas::Draft,
};
use fancy_regex::Regex;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Outcome of validating an instance against a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ErrorUnit>,
}

impl ValidationResult {
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            errors: Vec::new(),
        }
    }
    pub(crate) fn failure(error: ErrorUnit) -> Self {
        ValidationResult {
            valid: false,
            errors: vec![error],
        }
    }
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    pub fn errors(&self) -> &[ErrorUnit] {
        &self.errors
    }
    pub fn into_errors(self) -> Vec<ErrorUnit> {
        self.errors
    }
    pub(crate) fn push(&mut self, error: ErrorUnit) {
        self.valid = false;
        self.errors.push(error);
    }
    /// Take over the errors of a nested result.
    pub(crate) fn extend(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
    }
}

/// Shared, read-only state of a validation run.
pub struct ValidationContext<'a> {
    index: &'a SchemaIndex<'a>,
    draft: Draft,
    short_circuit: bool,
    formats: Option<&'a dyn FormatChecker>,
    regexes: &'a RegexCache,
}

impl<'a> ValidationContext<'a> {
    pub fn new(index: &'a SchemaIndex<'a>, draft: Draft, regexes: &'a RegexCache) -> Self {
        ValidationContext {
            index,
            draft,
            short_circuit: false,
            formats: None,
            regexes,
        }
    }

    /// Stop evaluating sibling keywords after the first failing one.
    pub fn short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit = short_circuit;
        self
    }

    /// Validate `format` values with `checker`. Without a checker `format` is an annotation.
    pub fn with_format_checker(mut self, checker: &'a dyn FormatChecker) -> Self {
        self.formats = Some(checker);
        self
    }

    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Validate `instance` against `schema`.
    ///
    /// `recursive_anchor` is the schema `$recursiveRef: "#"` resolves to, if an enclosing
    /// schema already captured one. Successfully evaluated properties and items of `instance`
    /// are added to `evaluated`.
    pub fn validate(
        &self,
        instance: &Value,
        schema: SchemaNode<'a>,
        recursive_anchor: Option<SchemaNode<'a>>,
        instance_location: &Location,
        schema_location: &Location,
        evaluated: &mut EvaluatedSet,
    ) -> Result<ValidationResult, SchemaError> {
        let scope = Scope {
            recursive_anchor,
            frame: None,
        };
        self.evaluate(
            instance,
            schema,
            scope,
            instance_location,
            schema_location,
            evaluated,
        )
    }

    pub(crate) fn evaluate(
        &self,
        instance: &Value,
        schema: SchemaNode<'a>,
        scope: Scope<'_, 'a>,
        instance_location: &Location,
        schema_location: &Location,
        evaluated: &mut EvaluatedSet,
    ) -> Result<ValidationResult, SchemaError> {
        let object = match schema {
            SchemaNode::Boolean(flag) => {
                return Ok(boolean::validate(
                    flag,
                    instance,
                    instance_location,
                    schema_location,
                ))
            }
            SchemaNode::Object(object) => object,
        };
        let mut scope = scope;
        if self.draft == Draft::Draft201909
            && scope.recursive_anchor.is_none()
            && schema.flag("$recursiveAnchor")
        {
            scope.recursive_anchor = Some(schema);
        }
        let index: &'a SchemaIndex<'a> = self.index;
        let frame;
        if let Some(uri) = index.annotation(&schema, Annotation::AbsoluteUri) {
            if scope.resource() != Some(uri) {
                frame = Frame {
                    kind: FrameKind::Resource(uri),
                    parent: scope.frame,
                };
                scope.frame = Some(&frame);
            }
        }
        let eval = Evaluation {
            ctx: self,
            schema: object,
            instance,
            scope,
            instance_location,
            schema_location,
        };
        let mut result = ValidationResult::success();
        self.apply_keywords(&eval, evaluated, &mut result)?;
        Ok(result)
    }

    fn apply_keywords(
        &self,
        eval: &Evaluation<'_, 'a>,
        evaluated: &mut EvaluatedSet,
        result: &mut ValidationResult,
    ) -> Result<(), SchemaError> {
        let object = eval.schema;
        let short_circuit = self.short_circuit;
        macro_rules! keyword {
            ($name:literal, $($validate:ident)::+) => {
                if let Some(value) = object.get($name) {
                    $($validate)::+(eval, value, evaluated, result)?;
                    if short_circuit && !result.is_valid() {
                        return Ok(());
                    }
                }
            };
        }

        match self.draft {
            Draft::Draft201909 => keyword!("$recursiveRef", ref_::validate_recursive),
            Draft::Draft202012 => keyword!("$dynamicRef", ref_::validate_recursive),
            _ => {}
        }
        if let Some(value) = object.get("$ref") {
            ref_::validate(eval, value, evaluated, result)?;
            if self.draft.ref_overrides_siblings() || (short_circuit && !result.is_valid()) {
                return Ok(());
            }
        }

        keyword!("type", type_::validate);
        if self.draft >= Draft::Draft7 {
            keyword!("const", const_::validate);
        }
        keyword!("enum", enum_::validate);
        keyword!("not", not::validate);
        keyword!("anyOf", any_of::validate);
        keyword!("allOf", all_of::validate);
        keyword!("oneOf", one_of::validate);
        if self.draft >= Draft::Draft7 {
            keyword!("if", if_::validate);
        }

        match eval.instance {
            Value::Object(_) => {
                keyword!("required", required::validate);
                keyword!("minProperties", min_properties::validate);
                keyword!("maxProperties", max_properties::validate);
                if self.draft >= Draft::Draft7 {
                    keyword!("propertyNames", property_names::validate);
                }
                if self.draft >= Draft::Draft201909 {
                    keyword!("dependentRequired", dependent_required::validate);
                    keyword!("dependentSchemas", dependencies::validate_schemas);
                } else {
                    keyword!("dependencies", dependencies::validate);
                }
                keyword!("properties", properties::validate);
                keyword!("patternProperties", pattern_properties::validate);
                if object.contains_key("additionalProperties") {
                    keyword!("additionalProperties", additional_properties::validate);
                } else if self.draft >= Draft::Draft201909 {
                    keyword!("unevaluatedProperties", unevaluated_properties::validate);
                }
            }
            Value::Array(_) => {
                keyword!("maxItems", max_items::validate);
                keyword!("minItems", min_items::validate);
                if self.draft >= Draft::Draft202012 {
                    keyword!("prefixItems", items::validate_prefix);
                }
                keyword!("items", items::validate);
                if self.draft <= Draft::Draft201909 {
                    keyword!("additionalItems", additional_items::validate);
                }
                if self.draft >= Draft::Draft7 {
                    keyword!("contains", contains::validate);
                }
                keyword!("uniqueItems", unique_items::validate);
                // After `contains`, which marks matching items as evaluated in 2020-12.
                // `additionalItems` only takes precedence in drafts that still apply it.
                let has_additional_items =
                    self.draft <= Draft::Draft201909 && object.contains_key("additionalItems");
                if self.draft >= Draft::Draft201909 && !has_additional_items {
                    keyword!("unevaluatedItems", unevaluated_items::validate);
                }
            }
            Value::Number(_) => {
                keyword!("minimum", minimum::validate);
                keyword!("maximum", maximum::validate);
                if self.draft >= Draft::Draft7 {
                    keyword!("exclusiveMinimum", exclusive_minimum::validate);
                    keyword!("exclusiveMaximum", exclusive_maximum::validate);
                }
                keyword!("multipleOf", multiple_of::validate);
            }
            Value::String(_) => {
                keyword!("minLength", min_length::validate);
                keyword!("maxLength", max_length::validate);
                keyword!("pattern", pattern::validate);
                keyword!("format", format::validate);
            }
            Value::Bool(_) | Value::Null => {}
        }
        Ok(())
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("draft", &self.draft)
            .field("short_circuit", &self.short_circuit)
            .field("formats", &self.formats.is_some())
            .field("index", &self.index.len())
            .finish()
    }
}

/// Dynamic state passed down the recursion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'f, 'a> {
    pub(crate) recursive_anchor: Option<SchemaNode<'a>>,
    frame: Option<&'f Frame<'f, 'a>>,
}

#[derive(Debug)]
enum FrameKind<'f, 'a> {
    /// A schema resource entered during evaluation.
    Resource(&'a str),
    /// A reference followed for the instance at the given location.
    Reference {
        target: usize,
        instance_location: &'f Location,
    },
}

#[derive(Debug)]
struct Frame<'f, 'a> {
    kind: FrameKind<'f, 'a>,
    parent: Option<&'f Frame<'f, 'a>>,
}

impl<'f, 'a> Scope<'f, 'a> {
    fn frames(&self) -> impl Iterator<Item = &'f Frame<'f, 'a>> {
        std::iter::successors(self.frame, |frame| frame.parent)
    }

    /// The innermost schema resource.
    fn resource(&self) -> Option<&'a str> {
        self.frames().find_map(|frame| match frame.kind {
            FrameKind::Resource(uri) => Some(uri),
            FrameKind::Reference { .. } => None,
        })
    }

    /// Schema resources in the dynamic scope, outermost first.
    pub(crate) fn resources(&self) -> Vec<&'a str> {
        let mut resources: Vec<&'a str> = self
            .frames()
            .filter_map(|frame| match frame.kind {
                FrameKind::Resource(uri) => Some(uri),
                FrameKind::Reference { .. } => None,
            })
            .collect();
        resources.reverse();
        resources
    }

    /// Whether `target` was already entered through a reference for the same instance location.
    fn is_cycle(&self, target: usize, instance_location: &Location) -> bool {
        self.frames().any(|frame| match frame.kind {
            FrameKind::Reference {
                target: seen,
                instance_location: seen_location,
            } => seen == target && seen_location == instance_location,
            FrameKind::Resource(_) => false,
        })
    }

    pub(crate) fn with_anchor(self, recursive_anchor: Option<SchemaNode<'a>>) -> Self {
        Scope {
            recursive_anchor,
            ..self
        }
    }
}

/// A single schema object applied to a single instance.
pub(crate) struct Evaluation<'e, 'a> {
    pub(crate) ctx: &'e ValidationContext<'a>,
    pub(crate) schema: &'a Map<String, Value>,
    pub(crate) instance: &'e Value,
    pub(crate) scope: Scope<'e, 'a>,
    pub(crate) instance_location: &'e Location,
    pub(crate) schema_location: &'e Location,
}

impl<'e, 'a> Evaluation<'e, 'a> {
    pub(crate) fn location<'s>(&self, segment: impl Into<LocationSegment<'s>>) -> Location {
        self.schema_location.join(segment)
    }

    pub(crate) fn error(&self, keyword: &'static str, kind: ValidationErrorKind) -> ErrorUnit {
        ErrorUnit::new(
            self.instance,
            kind,
            keyword,
            self.instance_location,
            self.location(keyword),
        )
    }

    pub(crate) fn invalid_keyword(&self, keyword: &'static str, value: &Value) -> SchemaError {
        SchemaError::invalid_keyword(keyword, &self.location(keyword), value)
    }

    pub(crate) fn regex(&self, pattern: &str) -> Result<Arc<Regex>, SchemaError> {
        self.ctx.regexes.get(pattern)
    }

    /// Validate `instance` against the subschema found at `schema_location`.
    pub(crate) fn descend(
        &self,
        subschema: &'a Value,
        instance: &Value,
        instance_location: &Location,
        schema_location: &Location,
        evaluated: &mut EvaluatedSet,
    ) -> Result<ValidationResult, SchemaError> {
        self.descend_in(
            self.scope,
            subschema,
            instance,
            instance_location,
            schema_location,
            evaluated,
        )
    }

    pub(crate) fn descend_in(
        &self,
        scope: Scope<'_, 'a>,
        subschema: &'a Value,
        instance: &Value,
        instance_location: &Location,
        schema_location: &Location,
        evaluated: &mut EvaluatedSet,
    ) -> Result<ValidationResult, SchemaError> {
        let node = SchemaNode::new(subschema).ok_or_else(|| SchemaError::InvalidSchema {
            location: schema_location.to_string(),
        })?;
        self.ctx.evaluate(
            instance,
            node,
            scope,
            instance_location,
            schema_location,
            evaluated,
        )
    }

    /// Scope for the alternatives of `allOf`, `anyOf`, `oneOf`.
    ///
    /// The captured recursive anchor is only passed on if this schema declares
    /// `$recursiveAnchor: true` itself.
    pub(crate) fn alternatives_scope(&self) -> Scope<'e, 'a> {
        if self.schema.get("$recursiveAnchor") == Some(&Value::Bool(true)) {
            self.scope
        } else {
            self.scope.with_anchor(None)
        }
    }

    /// Follow a reference to `target` for the current instance.
    pub(crate) fn follow(
        &self,
        reference: &str,
        target: SchemaNode<'a>,
        schema_location: &Location,
        evaluated: &mut EvaluatedSet,
    ) -> Result<ValidationResult, SchemaError> {
        let frame;
        let mut scope = self.scope;
        if let Some(address) = target.address() {
            if scope.is_cycle(address, self.instance_location) {
                return Err(SchemaError::CircularReference {
                    reference: reference.to_string(),
                    instance_location: self.instance_location.clone(),
                });
            }
            frame = Frame {
                kind: FrameKind::Reference {
                    target: address,
                    instance_location: self.instance_location,
                },
                parent: scope.frame,
            };
            scope.frame = Some(&frame);
        }
        self.ctx.evaluate(
            self.instance,
            target,
            scope,
            self.instance_location,
            schema_location,
            evaluated,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index::Dereferencer, uri::UriRef};
    use serde_json::json;

    fn run(schema: &Value, instance: &Value) -> ValidationResult {
        let mut index = SchemaIndex::new();
        let base = UriRef::parse("http://example.com/root.json", true).expect("Valid base");
        let node = SchemaNode::new(schema).expect("Valid schema");
        Dereferencer::new(Draft::Draft202012)
            .dereference(&mut index, node, &base, "")
            .expect("Valid schema");
        let regexes = RegexCache::new();
        let ctx = ValidationContext::new(&index, Draft::Draft202012, &regexes);
        ctx.validate(
            instance,
            node,
            None,
            &Location::new(),
            &Location::new(),
            &mut EvaluatedSet::new(),
        )
        .expect("No schema errors")
    }

    #[test]
    fn nested_property_error() {
        let schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
        let result = run(&schema, &json!({"name": 5}));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        let error = &result.errors()[0];
        assert_eq!(error.instance_location().as_str(), "#/name");
        assert_eq!(error.keyword(), "type");
        assert_eq!(error.keyword_location().as_str(), "#/properties/name/type");
    }

    #[test]
    fn boolean_schemas() {
        assert!(run(&json!(true), &json!(42)).is_valid());
        let result = run(&json!(false), &json!(42));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn short_circuit_stops_after_first_failure() {
        let schema = json!({"type": "string", "minLength": 3, "enum": ["a"]});
        let mut index = SchemaIndex::new();
        let base = UriRef::parse("http://example.com/root.json", true).expect("Valid base");
        let node = SchemaNode::new(&schema).expect("Valid schema");
        Dereferencer::new(Draft::Draft202012)
            .dereference(&mut index, node, &base, "")
            .expect("Valid schema");
        let regexes = RegexCache::new();
        let validate = |short_circuit: bool| {
            ValidationContext::new(&index, Draft::Draft202012, &regexes)
                .short_circuit(short_circuit)
                .validate(
                    &json!(12),
                    node,
                    None,
                    &Location::new(),
                    &Location::new(),
                    &mut EvaluatedSet::new(),
                )
                .expect("No schema errors")
        };
        assert_eq!(validate(true).errors().len(), 1);
        assert_eq!(validate(false).errors().len(), 2);
    }

    #[test]
    fn circular_references_are_detected() {
        let schema = json!({"$defs": {"a": {"$ref": "#/$defs/b"}, "b": {"$ref": "#/$defs/a"}}, "$ref": "#/$defs/a"});
        let mut index = SchemaIndex::new();
        let base = UriRef::parse("http://example.com/root.json", true).expect("Valid base");
        let node = SchemaNode::new(&schema).expect("Valid schema");
        Dereferencer::new(Draft::Draft202012)
            .dereference(&mut index, node, &base, "")
            .expect("Valid schema");
        let regexes = RegexCache::new();
        let result = ValidationContext::new(&index, Draft::Draft202012, &regexes).validate(
            &json!(1),
            node,
            None,
            &Location::new(),
            &Location::new(),
            &mut EvaluatedSet::new(),
        );
        assert!(matches!(result, Err(SchemaError::CircularReference { .. })));
    }
}
