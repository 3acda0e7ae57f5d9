//! # jsonschema-engine
//!
//! A JSON Schema validator for Draft 4, Draft 7, 2019-09 and 2020-12.
//!
//! Building a [`Validator`] runs a single dereferencing pass over the schema: every schema
//! location is registered in a [`SchemaIndex`] under its canonical URI, so references are plain
//! lookups afterwards. Validation walks the schema recursively and collects every failure as an
//! [`ErrorUnit`]. Structural problems of the schema itself, such as unresolvable references, are
//! reported as [`SchemaError`].
//!
//! ## Example:
//!
//! ```rust
//! use jsonschema_engine::{Draft, Validator};
//! use serde_json::json;
//!
//! let schema = json!({"type": "object", "required": ["name"], "properties": {"name": {"type": "string"}}});
//! let validator = Validator::options()
//!     .with_draft(Draft::Draft7)
//!     .with_output_format("basic")
//!     .build(&schema)
//!     .expect("A valid schema");
//! let output = validator.validate(&json!({"name": 5})).expect("No schema errors");
//! assert!(!output.is_valid());
//! for error in output.errors() {
//!     println!("{} at {}", error.error(), error.instance_location());
//! }
//! ```
//!
//! A validator borrows its schema and may be shared between threads.
#![warn(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    missing_debug_implementations,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
)]
mod ecma;
mod error;
mod evaluated;
pub mod formats;
mod index;
mod keywords;
pub mod loader;
mod node;
mod numeric;
mod options;
pub mod output;
mod paths;
mod primitive_type;
mod schemas;
#[cfg(test)]
mod tests_util;
mod uri;
mod validator;

pub use ecma::RegexCache;
pub use error::{ErrorUnit, SchemaError, TypeKind, ValidationErrorKind};
pub use evaluated::EvaluatedSet;
pub use formats::{DefaultFormatChecker, FormatChecker};
pub use index::{Dereferencer, NodeId, SchemaIndex};
pub use keywords::{ValidationContext, ValidationResult};
pub use loader::{DefaultLoader, SchemaLoader};
pub use node::{Annotation, Annotations, NodeKind, SchemaNode};
pub use options::ValidationOptions;
pub use output::{BasicError, OutputFormat, OutputUnit};
pub use paths::{Location, LocationSegment};
pub use primitive_type::PrimitiveType;
pub use schemas::{draft_from_schema, draft_from_url, Draft};
pub use uri::UriRef;
pub use validator::Validator;

use serde_json::Value;

/// Options for building a [`Validator`].
pub fn options<'s>() -> ValidationOptions<'s> {
    Validator::options()
}

/// Build a validator for `schema` with default options.
///
/// ```rust
/// use jsonschema_engine::validator_for;
/// use serde_json::json;
///
/// let schema = json!({"minimum": 5});
/// let validator = validator_for(&schema).expect("A valid schema");
/// assert!(validator.is_valid(&json!(7)).expect("No schema errors"));
/// ```
pub fn validator_for(schema: &Value) -> Result<Validator<'_>, SchemaError> {
    Validator::new(schema)
}

/// A shortcut for validating `instance` against `schema`. Draft version is detected automatically.
/// ```rust
/// use jsonschema_engine::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// # Panics
///
/// This function panics if `schema` is not a valid schema, for example when it contains an
/// unresolvable reference.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let validator = validator_for(schema).expect("Invalid schema");
    validator
        .is_valid(instance)
        .expect("Schema errors during validation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid() {
        let schema = json!({"minLength": 5});
        let valid = json!("foobar");
        let invalid = json!("foo");
        assert!(is_valid(&schema, &valid));
        assert!(!is_valid(&schema, &invalid));
    }

    #[test]
    fn validators_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator<'static>>();
        assert_send_sync::<SchemaError>();
    }
}
