//! Fetching external schema documents.
//!
//! Validators never perform I/O themselves. Documents referenced from a schema are fetched up
//! front with [`prefetch`] and handed over via [`crate::ValidationOptions::with_document`]:
//!
//! ```rust,no_run
//! # use jsonschema_engine::{loader::{prefetch, DefaultLoader}, Draft, ValidationOptions};
//! # use serde_json::json;
//! let schema = json!({"$ref": "file:///etc/schemas/person.json"});
//! let documents = prefetch(&schema, "json-schema://root/", Draft::Draft202012, &DefaultLoader)
//!     .expect("Reachable documents");
//! let mut options = ValidationOptions::default();
//! for (uri, document) in &documents {
//!     options.with_document(uri.as_str(), document);
//! }
//! let validator = options.build(&schema).expect("A valid schema");
//! ```
use crate::{
    error::SchemaError,
    schemas::{self, id_of, Draft},
    uri::UriRef,
};
use ahash::AHashSet;
use serde_json::Value;

/// Retrieves schema documents by URI.
///
/// Authentication, caching and any other transport concerns belong to implementors.
pub trait SchemaLoader: Send + Sync {
    /// Fetch the document identified by `uri`. The URI never carries a fragment.
    fn fetch(&self, uri: &UriRef) -> Result<Value, anyhow::Error>;
}

/// Reads `file://` URIs and, with the `resolve-http` feature, fetches `http(s)://` ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultLoader;

impl SchemaLoader for DefaultLoader {
    fn fetch(&self, uri: &UriRef) -> Result<Value, anyhow::Error> {
        match uri.scheme() {
            Some("http" | "https") => {
                #[cfg(feature = "resolve-http")]
                {
                    Ok(reqwest::blocking::get(uri.href())?.json()?)
                }
                #[cfg(not(feature = "resolve-http"))]
                Err(anyhow::anyhow!(
                    "`resolve-http` feature or a custom loader is required to fetch schemas via HTTP"
                ))
            }
            Some("file") => {
                #[cfg(feature = "resolve-file")]
                {
                    let path = percent_encoding::percent_decode_str(uri.path()).decode_utf8()?;
                    let file = std::fs::File::open(&*path)?;
                    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
                }
                #[cfg(not(feature = "resolve-file"))]
                {
                    Err(anyhow::anyhow!(
                        "`resolve-file` feature or a custom loader is required to read schema files"
                    ))
                }
            }
            Some(scheme) => Err(anyhow::anyhow!("Unknown scheme {}", scheme)),
            None => Err(anyhow::anyhow!("Cannot fetch the relative URI {}", uri)),
        }
    }
}

impl<F> SchemaLoader for F
where
    F: Fn(&UriRef) -> Result<Value, anyhow::Error> + Send + Sync,
{
    fn fetch(&self, uri: &UriRef) -> Result<Value, anyhow::Error> {
        self(uri)
    }
}

/// Keywords whose values are plain data, never schemas.
const DATA_KEYWORDS: &[&str] = &["const", "default", "enum", "examples"];
const REFERENCE_KEYWORDS: &[&str] = &["$ref", "$recursiveRef", "$dynamicRef"];

/// Fetch every external document reachable from `schema` through references.
///
/// Documents are returned as `(uri, document)` pairs in fetch order. The caller keeps them
/// alive for as long as the validator built from them.
pub fn prefetch(
    schema: &Value,
    base_uri: &str,
    draft: Draft,
    loader: &dyn SchemaLoader,
) -> Result<Vec<(String, Value)>, SchemaError> {
    let base = UriRef::parse(base_uri, true)?.without_fragment();
    let mut known = AHashSet::new();
    let mut pending = Vec::new();
    known.insert(base.href());
    enqueue(schema, &base, draft, &mut known, &mut pending)?;
    let mut documents = Vec::new();
    while let Some(uri) = pending.pop() {
        let target = UriRef::parse(&uri, true)?;
        tracing::debug!(uri = %uri, "Fetching external schema");
        let document = loader
            .fetch(&target)
            .map_err(|source| SchemaError::Unretrievable {
                uri: uri.clone(),
                source,
            })?;
        let document_draft = schemas::draft_from_schema(&document).unwrap_or(draft);
        enqueue(&document, &target, document_draft, &mut known, &mut pending)?;
        documents.push((uri, document));
    }
    Ok(documents)
}

/// Queue the documents `schema` references that are neither embedded nor already known.
fn enqueue(
    schema: &Value,
    base: &UriRef,
    draft: Draft,
    known: &mut AHashSet<String>,
    pending: &mut Vec<String>,
) -> Result<(), SchemaError> {
    let mut resources = Vec::new();
    let mut references = Vec::new();
    collect(schema, base, draft, &mut resources, &mut references)?;
    known.extend(resources);
    for reference in references {
        if known.insert(reference.clone()) {
            pending.push(reference);
        }
    }
    Ok(())
}

fn collect(
    value: &Value,
    base: &UriRef,
    draft: Draft,
    resources: &mut Vec<String>,
    references: &mut Vec<String>,
) -> Result<(), SchemaError> {
    match value {
        Value::Object(object) => {
            let mut base = base.clone();
            if let Some(id) = id_of(draft, object) {
                let resolved = base.resolve(id)?;
                if !resolved.has_plain_name_fragment() {
                    base = resolved.without_fragment();
                    resources.push(base.href());
                }
            }
            for keyword in REFERENCE_KEYWORDS {
                if let Some(reference) = object.get(*keyword).and_then(Value::as_str) {
                    references.push(base.resolve(reference)?.without_fragment().href());
                }
            }
            for (keyword, child) in object {
                if !DATA_KEYWORDS.contains(&keyword.as_str()) {
                    collect(child, &base, draft, resources, references)?;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, base, draft, resources, references)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    struct Recording {
        documents: Vec<(&'static str, Value)>,
        fetched: Mutex<Vec<String>>,
    }

    impl SchemaLoader for Recording {
        fn fetch(&self, uri: &UriRef) -> Result<Value, anyhow::Error> {
            let href = uri.href();
            self.fetched.lock().push(href.clone());
            self.documents
                .iter()
                .find(|(known, _)| *known == href)
                .map(|(_, document)| document.clone())
                .ok_or_else(|| anyhow::anyhow!("Not found: {}", href))
        }
    }

    #[test]
    fn transitive_closure() {
        let loader = Recording {
            documents: vec![
                (
                    "http://example.com/a.json",
                    json!({"$ref": "b.json#/$defs/x"}),
                ),
                (
                    "http://example.com/b.json",
                    json!({"$defs": {"x": {"$ref": "a.json"}}}),
                ),
            ],
            fetched: Mutex::new(Vec::new()),
        };
        let schema = json!({"properties": {"a": {"$ref": "http://example.com/a.json"}}});
        let documents =
            prefetch(&schema, "json-schema://root/", Draft::Draft202012, &loader).expect("Fetched");
        let uris: Vec<&str> = documents.iter().map(|(uri, _)| uri.as_str()).collect();
        assert_eq!(uris, ["http://example.com/a.json", "http://example.com/b.json"]);
        assert_eq!(loader.fetched.lock().len(), 2);
    }

    #[test]
    fn embedded_resources_are_not_fetched() {
        let loader = |uri: &UriRef| -> Result<Value, anyhow::Error> {
            Err(anyhow::anyhow!("Unexpected fetch of {}", uri))
        };
        let schema = json!({
            "$id": "http://example.com/root.json",
            "$defs": {"inner": {"$id": "inner.json", "type": "string"}},
            "properties": {
                "a": {"$ref": "inner.json"},
                "b": {"$ref": "#/$defs/inner"},
                "c": {"const": {"$ref": "http://example.com/data.json"}}
            }
        });
        let documents =
            prefetch(&schema, "json-schema://root/", Draft::Draft202012, &loader).expect("Nothing to fetch");
        assert!(documents.is_empty());
    }

    #[test]
    fn failures_are_reported() {
        let loader = |_: &UriRef| -> Result<Value, anyhow::Error> { Err(anyhow::anyhow!("offline")) };
        let schema = json!({"$ref": "http://example.com/missing.json"});
        let error = prefetch(&schema, "json-schema://root/", Draft::Draft202012, &loader)
            .expect_err("Fetch fails");
        assert!(matches!(
            error,
            SchemaError::Unretrievable { ref uri, .. } if uri == "http://example.com/missing.json"
        ));
    }

    #[test]
    fn unknown_scheme() {
        let uri = UriRef::parse("urn:example:schema", true).expect("Valid URI");
        assert!(DefaultLoader.fetch(&uri).is_err());
    }

    #[cfg(feature = "resolve-file")]
    #[test]
    fn reads_files() {
        let path = std::env::temp_dir().join("jsonschema-engine-loader-test.json");
        std::fs::write(&path, r#"{"type": "integer"}"#).expect("Writable temp dir");
        let uri = UriRef::parse(&format!("file://{}", path.display()), true).expect("Valid URI");
        let document = DefaultLoader.fetch(&uri).expect("Readable file");
        assert_eq!(document, json!({"type": "integer"}));
        let _ = std::fs::remove_file(path);
    }
}
