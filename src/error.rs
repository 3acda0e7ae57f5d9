//! Error types.
//!
//! Two families of errors exist. [`SchemaError`] is fatal: the schema (or a reference inside it)
//! can't be used, and the whole operation is aborted. [`ErrorUnit`] is a regular validation
//! failure collected while walking an instance.
use crate::{paths::Location, primitive_type::PrimitiveType};
use serde_json::Value;
use std::{error, fmt};

/// A fatal error raised while building an index or walking a schema.
#[derive(Debug)]
pub enum SchemaError {
    /// Input could not be parsed as a URI reference, or lacks parts required in strict mode.
    InvalidUrl { input: String, reason: &'static str },
    /// Two distinct schema locations produced the same canonical URI.
    DuplicateSchemaUri { uri: String },
    /// A reference points to a URI that is not present in the index.
    UnresolvedRef { reference: String, known: Vec<String> },
    /// A keyword has a value that can't be used for validation.
    InvalidKeyword {
        keyword: &'static str,
        location: Location,
        value: Value,
    },
    /// A `pattern` or `patternProperties` key is not a valid regular expression.
    InvalidRegex { pattern: String, error: String },
    /// A value expected to be a schema is neither an object nor a boolean.
    InvalidSchema { location: String },
    /// An annotation name or another argument is not recognized.
    InvalidArgument { argument: String },
    /// The operation is not supported for this kind of value.
    UnsupportedOperation { operation: &'static str },
    /// Unknown output format name.
    UnsupportedOutputFormat { format: String },
    /// Following references leads back to the same schema for the same instance location.
    CircularReference {
        reference: String,
        instance_location: Location,
    },
    /// An external document could not be fetched or parsed.
    Unretrievable { uri: String, source: anyhow::Error },
}

impl SchemaError {
    pub(crate) fn invalid_url(input: impl Into<String>, reason: &'static str) -> SchemaError {
        SchemaError::InvalidUrl {
            input: input.into(),
            reason,
        }
    }
    pub(crate) fn invalid_keyword(
        keyword: &'static str,
        location: &Location,
        value: &Value,
    ) -> SchemaError {
        SchemaError::InvalidKeyword {
            keyword,
            location: location.clone(),
            value: value.clone(),
        }
    }
    pub(crate) fn unresolved_ref<'a>(
        reference: impl Into<String>,
        known: impl Iterator<Item = &'a str>,
    ) -> SchemaError {
        let mut known: Vec<String> = known.map(str::to_string).collect();
        known.sort_unstable();
        SchemaError::UnresolvedRef {
            reference: reference.into(),
            known,
        }
    }
}

impl error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SchemaError::Unretrievable { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::InvalidUrl { input, reason } => {
                write!(f, "Invalid URL '{}': {}", input, reason)
            }
            SchemaError::DuplicateSchemaUri { uri } => {
                write!(f, "Schema URI is registered more than once: {}", uri)
            }
            SchemaError::UnresolvedRef { reference, known } => write!(
                f,
                "Unresolvable reference: {}. Known URIs: [{}]",
                reference,
                known.join(", ")
            ),
            SchemaError::InvalidKeyword {
                keyword,
                location,
                value,
            } => write!(
                f,
                "Invalid value for '{}' at {}: {}",
                keyword, location, value
            ),
            SchemaError::InvalidRegex { pattern, error } => {
                write!(f, "Invalid regular expression '{}': {}", pattern, error)
            }
            SchemaError::InvalidSchema { location } => write!(
                f,
                "Schema at '{}' must be an object or a boolean",
                location
            ),
            SchemaError::InvalidArgument { argument } => {
                write!(f, "Invalid argument: {}", argument)
            }
            SchemaError::UnsupportedOperation { operation } => {
                write!(f, "Operation '{}' is not supported for boolean schemas", operation)
            }
            SchemaError::UnsupportedOutputFormat { format } => {
                write!(f, "Unsupported output format: {}", format)
            }
            SchemaError::CircularReference {
                reference,
                instance_location,
            } => write!(
                f,
                "Circular reference '{}' for the instance at {}",
                reference, instance_location
            ),
            SchemaError::Unretrievable { uri, source } => {
                write!(f, "Failed to retrieve '{}': {}", uri, source)
            }
        }
    }
}

/// For faster error handling in the "type" keyword we keep the expected types as an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple(Vec<PrimitiveType>),
}

/// Kinds of errors that may happen during validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// The input array contains more items than expected.
    AdditionalItems { limit: usize },
    /// Unexpected properties.
    AdditionalProperties { unexpected: Vec<String> },
    /// The input value is not valid under all of the given schemas.
    AllOf,
    /// The input value is not valid under any of the given schemas.
    AnyOf,
    /// Regular expression evaluation gave up on the input.
    BacktrackLimitExceeded { error: String },
    /// The input value doesn't match the expected constant.
    Constant { expected_value: Value },
    /// The input array doesn't contain items conforming to the specified schema.
    Contains,
    /// A property listed as a dependency is missing.
    DependentRequired { property: String, dependency: String },
    /// The input value doesn't match any of specified options.
    Enum { options: Value },
    /// Value is too large.
    ExclusiveMaximum { limit: Value },
    /// Value is too small.
    ExclusiveMinimum { limit: Value },
    /// Everything is invalid for the `false` schema.
    FalseSchema,
    /// The input doesn't match the specified format.
    Format { format: String, message: String },
    /// The `then` branch failed after `if` matched.
    IfThen,
    /// The `else` branch failed after `if` didn't match.
    IfElse,
    /// Too many items match the `contains` schema.
    MaxContains { limit: u64 },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// Value is too large.
    Maximum { limit: Value },
    /// String is too long.
    MaxLength { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items match the `contains` schema.
    MinContains { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Value is too small.
    Minimum { limit: Value },
    /// String is too short.
    MinLength { limit: u64 },
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// The number is not a multiple of another number.
    MultipleOf { multiple_of: Value },
    /// Negated schema matched.
    Not { schema: Value },
    /// The input is valid under more than one of the given schemas.
    OneOfMultipleValid,
    /// The input is not valid under any of the given schemas.
    OneOfNotValid,
    /// The input doesn't match a pattern.
    Pattern { pattern: String },
    /// A property name is invalid.
    PropertyNames { message: String },
    /// The referenced schema failed.
    Reference { reference: String },
    /// A required property is missing.
    Required { property: String },
    /// The input value doesn't match one or multiple required types.
    Type { kind: TypeKind },
    /// Items not covered by any other keyword are not allowed.
    UnevaluatedItems { unexpected: Vec<usize> },
    /// Properties not covered by any other keyword are not allowed.
    UnevaluatedProperties { unexpected: Vec<String> },
    /// The input array has non-unique elements.
    UniqueItems,
}

fn plural(count: u64, singular: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        many
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrorKind {
    fn describe(&self, instance: &Value) -> String {
        match self {
            ValidationErrorKind::AdditionalItems { limit } => {
                let extras: Vec<String> = instance
                    .as_array()
                    .into_iter()
                    .flatten()
                    .skip(*limit)
                    .map(Value::to_string)
                    .collect();
                let verb = plural(extras.len() as u64, "was", "were");
                format!(
                    "Additional items are not allowed ({} {} unexpected)",
                    extras.join(", "),
                    verb
                )
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => format!(
                "Additional properties are not allowed ({} {} unexpected)",
                quoted(unexpected),
                plural(unexpected.len() as u64, "was", "were")
            ),
            ValidationErrorKind::AllOf => format!(
                "{} is not valid under all of the schemas listed in the 'allOf' keyword",
                instance
            ),
            ValidationErrorKind::AnyOf => format!(
                "{} is not valid under any of the schemas listed in the 'anyOf' keyword",
                instance
            ),
            ValidationErrorKind::BacktrackLimitExceeded { error } => {
                format!("Error evaluating pattern: {}", error)
            }
            ValidationErrorKind::Constant { expected_value } => {
                format!("{} was expected", expected_value)
            }
            ValidationErrorKind::Contains => format!(
                "None of {} are valid under the given schema",
                instance
            ),
            ValidationErrorKind::DependentRequired {
                property,
                dependency,
            } => format!(
                "'{}' is a required property when '{}' is present",
                dependency, property
            ),
            ValidationErrorKind::Enum { options } => {
                format!("{} is not one of {}", instance, options)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => format!(
                "{} is greater than or equal to the maximum of {}",
                instance, limit
            ),
            ValidationErrorKind::ExclusiveMinimum { limit } => format!(
                "{} is less than or equal to the minimum of {}",
                instance, limit
            ),
            ValidationErrorKind::FalseSchema => format!("False schema does not allow {}", instance),
            ValidationErrorKind::Format { message, .. } => message.clone(),
            ValidationErrorKind::IfThen => {
                format!("{} does not match the 'then' schema", instance)
            }
            ValidationErrorKind::IfElse => {
                format!("{} does not match the 'else' schema", instance)
            }
            ValidationErrorKind::MaxContains { limit } => format!(
                "{} contains more than {} matching {}",
                instance,
                limit,
                plural(*limit, "item", "items")
            ),
            ValidationErrorKind::MaxItems { limit } => format!(
                "{} has more than {} {}",
                instance,
                limit,
                plural(*limit, "item", "items")
            ),
            ValidationErrorKind::Maximum { limit } => {
                format!("{} is greater than the maximum of {}", instance, limit)
            }
            ValidationErrorKind::MaxLength { limit } => format!(
                "{} is longer than {} {}",
                instance,
                limit,
                plural(*limit, "character", "characters")
            ),
            ValidationErrorKind::MaxProperties { limit } => format!(
                "{} has more than {} {}",
                instance,
                limit,
                plural(*limit, "property", "properties")
            ),
            ValidationErrorKind::MinContains { limit } => format!(
                "{} contains fewer than {} matching {}",
                instance,
                limit,
                plural(*limit, "item", "items")
            ),
            ValidationErrorKind::MinItems { limit } => format!(
                "{} has less than {} {}",
                instance,
                limit,
                plural(*limit, "item", "items")
            ),
            ValidationErrorKind::Minimum { limit } => {
                format!("{} is less than the minimum of {}", instance, limit)
            }
            ValidationErrorKind::MinLength { limit } => format!(
                "{} is shorter than {} {}",
                instance,
                limit,
                plural(*limit, "character", "characters")
            ),
            ValidationErrorKind::MinProperties { limit } => format!(
                "{} has less than {} {}",
                instance,
                limit,
                plural(*limit, "property", "properties")
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                format!("{} is not a multiple of {}", instance, multiple_of)
            }
            ValidationErrorKind::Not { schema } => {
                format!("{} is not allowed for {}", schema, instance)
            }
            ValidationErrorKind::OneOfMultipleValid => format!(
                "{} is valid under more than one of the schemas listed in the 'oneOf' keyword",
                instance
            ),
            ValidationErrorKind::OneOfNotValid => format!(
                "{} is not valid under any of the schemas listed in the 'oneOf' keyword",
                instance
            ),
            ValidationErrorKind::Pattern { pattern } => {
                format!("{} does not match \"{}\"", instance, pattern)
            }
            ValidationErrorKind::PropertyNames { message } => message.clone(),
            ValidationErrorKind::Reference { reference } => format!(
                "{} is not valid under the schema referenced by '{}'",
                instance, reference
            ),
            ValidationErrorKind::Required { property } => {
                format!("\"{}\" is a required property", property)
            }
            ValidationErrorKind::Type {
                kind: TypeKind::Single(type_),
            } => format!("{} is not of type \"{}\"", instance, type_),
            ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            } => format!(
                "{} is not of types {}",
                instance,
                types
                    .iter()
                    .map(|t| format!("\"{}\"", t))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ValidationErrorKind::UnevaluatedItems { unexpected } => {
                let items: Vec<String> = unexpected
                    .iter()
                    .filter_map(|idx| instance.get(*idx))
                    .map(Value::to_string)
                    .collect();
                format!(
                    "Unevaluated items are not allowed ({} {} unexpected)",
                    items.join(", "),
                    plural(items.len() as u64, "was", "were")
                )
            }
            ValidationErrorKind::UnevaluatedProperties { unexpected } => format!(
                "Unevaluated properties are not allowed ({} {} unexpected)",
                quoted(unexpected),
                plural(unexpected.len() as u64, "was", "were")
            ),
            ValidationErrorKind::UniqueItems => format!("{} has non-unique elements", instance),
        }
    }
}

/// A single validation failure.
///
/// `keyword_location` is the dynamic path through the schema, including the `$ref` hops taken
/// to reach the failing keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorUnit {
    instance_location: Location,
    keyword: &'static str,
    keyword_location: Location,
    kind: ValidationErrorKind,
    message: String,
}

impl ErrorUnit {
    pub(crate) fn new(
        instance: &Value,
        kind: ValidationErrorKind,
        keyword: &'static str,
        instance_location: &Location,
        keyword_location: Location,
    ) -> ErrorUnit {
        let message = kind.describe(instance);
        ErrorUnit {
            instance_location: instance_location.clone(),
            keyword,
            keyword_location,
            kind,
            message,
        }
    }
    /// Where in the instance the failure happened.
    pub fn instance_location(&self) -> &Location {
        &self.instance_location
    }
    /// The keyword that failed.
    pub fn keyword(&self) -> &str {
        self.keyword
    }
    /// The schema path that led to the failing keyword.
    pub fn keyword_location(&self) -> &Location {
        &self.keyword_location
    }
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for ErrorUnit {}

impl fmt::Display for ErrorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
