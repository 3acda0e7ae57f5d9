use crate::{
    error::SchemaError,
    formats::FormatChecker,
    output::OutputFormat,
    schemas::Draft,
    validator::Validator,
};
use serde_json::Value;
use std::{fmt, sync::Arc};

pub(crate) const DEFAULT_BASE_URI: &str = "json-schema://root/";

/// Configuration for building a [`Validator`].
///
/// ```rust
/// # use jsonschema_engine::{Draft, ValidationOptions};
/// # use serde_json::json;
/// let schema = json!({"maxLength": 5});
/// let validator = ValidationOptions::default()
///     .with_draft(Draft::Draft7)
///     .with_output_format("basic")
///     .build(&schema)
///     .expect("A valid schema");
/// assert!(!validator.is_valid(&json!("foobar")).expect("No schema errors"));
/// ```
#[derive(Clone)]
pub struct ValidationOptions<'s> {
    base_uri: String,
    draft: Option<Draft>,
    output_format: String,
    short_circuit: bool,
    format_checker: Option<Arc<dyn FormatChecker>>,
    validate_formats: bool,
    documents: Vec<(String, &'s Value)>,
}

impl Default for ValidationOptions<'_> {
    fn default() -> Self {
        ValidationOptions {
            base_uri: DEFAULT_BASE_URI.to_string(),
            draft: None,
            output_format: OutputFormat::default().into(),
            short_circuit: false,
            format_checker: None,
            validate_formats: true,
            documents: Vec::new(),
        }
    }
}

impl<'s> ValidationOptions<'s> {
    pub(crate) fn base_uri(&self) -> &str {
        &self.base_uri
    }
    pub(crate) fn draft(&self) -> Option<Draft> {
        self.draft
    }
    pub(crate) fn output_format(&self) -> &str {
        &self.output_format
    }
    pub(crate) fn is_short_circuit(&self) -> bool {
        self.short_circuit
    }
    pub(crate) fn documents(&self) -> &[(String, &'s Value)] {
        &self.documents
    }
    /// The checker `format` is validated with, if any.
    pub(crate) fn format_checker(&self) -> Option<Arc<dyn FormatChecker>> {
        if !self.validate_formats {
            return None;
        }
        match &self.format_checker {
            Some(checker) => Some(Arc::clone(checker)),
            None => Some(Arc::new(crate::formats::DefaultFormatChecker)),
        }
    }

    /// Build a [`Validator`] for `schema` using these options.
    pub fn build(&self, schema: &'s Value) -> Result<Validator<'s>, SchemaError> {
        Validator::create(schema, self)
    }

    /// URI the root document is identified by, unless it declares its own `$id`.
    ///
    /// Must be absolute. Defaults to `json-schema://root/`.
    #[inline]
    pub fn with_base_uri(&mut self, base_uri: impl Into<String>) -> &mut Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Ensure that the schema is going to be validated using the defined Draft.
    ///
    /// Draft is detected in the following precedence order:
    ///   - Explicitly specified;
    ///   - $schema field in the document;
    ///   - Draft::default()
    ///
    /// ```rust
    /// # use jsonschema_engine::{Draft, ValidationOptions};
    /// # let mut options = ValidationOptions::default();
    /// options.with_draft(Draft::Draft4);
    /// ```
    #[inline]
    pub fn with_draft(&mut self, draft: Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// `"flag"` or `"basic"`. Anything else makes [`ValidationOptions::build`] fail.
    #[inline]
    pub fn with_output_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.output_format = format.into();
        self
    }

    /// Stop at the first failing keyword of every schema object.
    #[inline]
    pub fn short_circuit(&mut self, short_circuit: bool) -> &mut Self {
        self.short_circuit = short_circuit;
        self
    }

    /// Use a custom checker for the `format` keyword.
    ///
    /// ```rust
    /// # use jsonschema_engine::{PrimitiveType, ValidationOptions};
    /// # use serde_json::{json, Value};
    /// # use std::sync::Arc;
    /// let checker = |_: PrimitiveType, format: &str, value: &Value| match format {
    ///     "lowercase" if value.as_str().map_or(false, |s| s.chars().any(char::is_uppercase)) => {
    ///         Some(format!("{} is not lowercase", value))
    ///     }
    ///     _ => None,
    /// };
    /// let schema = json!({"format": "lowercase"});
    /// let validator = ValidationOptions::default()
    ///     .with_format_checker(Arc::new(checker))
    ///     .build(&schema)
    ///     .expect("A valid schema");
    /// assert!(!validator.is_valid(&json!("Foo")).expect("No schema errors"));
    /// ```
    #[inline]
    pub fn with_format_checker(&mut self, checker: Arc<dyn FormatChecker>) -> &mut Self {
        self.format_checker = Some(checker);
        self
    }

    /// Whether `format` is validated at all. Enabled by default.
    #[inline]
    pub fn should_validate_formats(&mut self, validate_formats: bool) -> &mut Self {
        self.validate_formats = validate_formats;
        self
    }

    /// Make an already loaded document available to references under `uri`.
    ///
    /// ```rust
    /// # use jsonschema_engine::ValidationOptions;
    /// # use serde_json::json;
    /// let external = json!({"type": "integer"});
    /// let schema = json!({"$ref": "http://example.com/integer.json"});
    /// let validator = ValidationOptions::default()
    ///     .with_document("http://example.com/integer.json", &external)
    ///     .build(&schema)
    ///     .expect("A valid schema");
    /// assert!(validator.is_valid(&json!(1)).expect("No schema errors"));
    /// ```
    #[inline]
    pub fn with_document(&mut self, uri: impl Into<String>, document: &'s Value) -> &mut Self {
        self.documents.push((uri.into(), document));
        self
    }
}

impl fmt::Debug for ValidationOptions<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("ValidationOptions")
            .field("base_uri", &self.base_uri)
            .field("draft", &self.draft)
            .field("output_format", &self.output_format)
            .field("short_circuit", &self.short_circuit)
            .field("validate_formats", &self.validate_formats)
            .field(
                "documents",
                &self
                    .documents
                    .iter()
                    .map(|(uri, _)| uri.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let options = ValidationOptions::default();
        assert_eq!(options.base_uri(), DEFAULT_BASE_URI);
        assert_eq!(options.draft(), None);
        assert_eq!(options.output_format(), "flag");
        assert!(!options.is_short_circuit());
        assert!(options.format_checker().is_some());
    }

    #[test]
    fn disabling_formats() {
        let mut options = ValidationOptions::default();
        options.should_validate_formats(false);
        assert!(options.format_checker().is_none());
    }

    #[test]
    fn output_format_is_checked_on_build() {
        let schema = json!({});
        let error = ValidationOptions::default()
            .with_output_format("detailed")
            .build(&schema)
            .expect_err("Unsupported format");
        assert!(matches!(error, SchemaError::UnsupportedOutputFormat { .. }));
    }

    #[test]
    fn output_format_enum() {
        let mut options = ValidationOptions::default();
        options.with_output_format(OutputFormat::Basic);
        assert_eq!(options.output_format(), "basic");
    }

    #[test]
    fn debug_lists_documents() {
        let document = json!({});
        let mut options = ValidationOptions::default();
        options.with_document("http://example.com/a.json", &document);
        assert!(format!("{:?}", options).contains("http://example.com/a.json"));
    }
}
