//! Building validators and running them against instances.
use crate::{
    ecma::RegexCache,
    error::SchemaError,
    evaluated::EvaluatedSet,
    formats::FormatChecker,
    index::{Dereferencer, SchemaIndex},
    keywords::{ValidationContext, ValidationResult},
    node::SchemaNode,
    options::ValidationOptions,
    output::{OutputFormat, OutputUnit},
    paths::Location,
    schemas::{self, Draft},
    uri::UriRef,
};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// A schema document together with its index, ready to validate instances.
///
/// Validators borrow the schema and all registered documents. They are `Send` and `Sync`, so a
/// single validator may serve many threads at once.
///
/// ```rust
/// # use jsonschema_engine::Validator;
/// # use serde_json::json;
/// let schema = json!({"type": "object", "required": ["name"]});
/// let validator = Validator::options()
///     .with_output_format("basic")
///     .build(&schema)
///     .expect("A valid schema");
/// let output = validator.validate(&json!({})).expect("No schema errors");
/// assert!(!output.is_valid());
/// assert_eq!(output.errors()[0].error(), "\"name\" is a required property");
/// ```
pub struct Validator<'s> {
    root: SchemaNode<'s>,
    index: SchemaIndex<'s>,
    draft: Draft,
    output_format: OutputFormat,
    short_circuit: bool,
    format_checker: Option<Arc<dyn FormatChecker>>,
    regexes: RegexCache,
}

impl<'s> Validator<'s> {
    /// Return a default `ValidationOptions` that can configure a validator.
    pub fn options() -> ValidationOptions<'s> {
        ValidationOptions::default()
    }

    /// Build a validator with default options.
    pub fn new(schema: &'s Value) -> Result<Validator<'s>, SchemaError> {
        Self::options().build(schema)
    }

    /// Dereference `schema` and every registered document into a fresh index.
    pub fn create(
        schema: &'s Value,
        options: &ValidationOptions<'s>,
    ) -> Result<Validator<'s>, SchemaError> {
        let output_format: OutputFormat = options.output_format().parse()?;
        let root = SchemaNode::new(schema).ok_or_else(|| SchemaError::InvalidSchema {
            location: Location::new().to_string(),
        })?;
        let draft = options.draft().unwrap_or_else(|| detect_draft(schema));
        let base = UriRef::parse(options.base_uri(), true)?.without_fragment();
        let mut index = SchemaIndex::new();
        Dereferencer::new(draft).dereference(&mut index, root, &base, "")?;
        for (uri, document) in options.documents() {
            let uri = UriRef::parse(uri, true)?.without_fragment();
            let node = SchemaNode::new(document).ok_or_else(|| SchemaError::InvalidSchema {
                location: uri.href(),
            })?;
            let document_draft = schemas::draft_from_schema(document).unwrap_or(draft);
            Dereferencer::new(document_draft).dereference(&mut index, node, &uri, "")?;
        }
        tracing::debug!(
            draft = ?draft,
            base_uri = %base,
            entries = index.len(),
            "Built validator"
        );
        Ok(Validator {
            root,
            index,
            draft,
            output_format,
            short_circuit: options.is_short_circuit(),
            format_checker: options.format_checker(),
            regexes: RegexCache::new(),
        })
    }

    pub fn draft(&self) -> Draft {
        self.draft
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Every URI references can resolve to.
    pub fn index(&self) -> &SchemaIndex<'s> {
        &self.index
    }

    /// Validate `instance` and render the result in the configured output format.
    pub fn validate(&self, instance: &Value) -> Result<OutputUnit, SchemaError> {
        Ok(self.output_format.format(self.apply(instance)?))
    }

    /// Run validation and return a boolean result.
    pub fn is_valid(&self, instance: &Value) -> Result<bool, SchemaError> {
        Ok(self.apply(instance)?.is_valid())
    }

    /// Validate `instance` and return every error, regardless of the output format.
    pub fn apply(&self, instance: &Value) -> Result<ValidationResult, SchemaError> {
        let mut context = ValidationContext::new(&self.index, self.draft, &self.regexes)
            .short_circuit(self.short_circuit);
        if let Some(checker) = self.format_checker.as_deref() {
            context = context.with_format_checker(checker);
        }
        let root = Location::new();
        context.validate(
            instance,
            self.root,
            None,
            &root,
            &root,
            &mut EvaluatedSet::new(),
        )
    }
}

fn detect_draft(schema: &Value) -> Draft {
    match schema.get("$schema").and_then(Value::as_str) {
        Some(url) => schemas::draft_from_url(url).unwrap_or_else(|| {
            tracing::warn!(schema = url, "Unknown $schema, falling back to the default draft");
            Draft::default()
        }),
        None => Draft::default(),
    }
}

impl fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("draft", &self.draft)
            .field("output_format", &self.output_format)
            .field("short_circuit", &self.short_circuit)
            .field("entries", &self.index.len())
            .finish()
    }
}
