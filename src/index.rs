//! Canonical URI registry and the walk that fills it.
//!
//! Every schema location reachable from a document root is registered under
//! `<resource URI>#<JSON pointer>`, and under `<resource URI>` alone for resource roots.
//! Identifiers (`id` / `$id`) start new resources, anchors add location-independent names.
//! While walking, each object node receives annotations with its absolute resource URI and the
//! resolved targets of its references.
use crate::{
    error::SchemaError,
    node::{Annotation, Annotations, SchemaNode},
    paths::{unescape_token, write_escaped_str},
    schemas::{id_of, Draft},
    uri::UriRef,
};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;

/// Position of a node inside [`SchemaIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Entry<'s> {
    node: SchemaNode<'s>,
    annotations: Annotations,
}

/// Map from canonical URIs to schema nodes.
#[derive(Debug, Default)]
pub struct SchemaIndex<'s> {
    entries: Vec<Entry<'s>>,
    by_uri: AHashMap<String, NodeId>,
    by_address: AHashMap<usize, NodeId>,
    dynamic_anchors: AHashSet<String>,
}

impl<'s> SchemaIndex<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered URIs.
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.by_uri.contains_key(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.by_uri.keys().map(String::as_str)
    }

    /// Exact lookup by canonical URI.
    pub fn get(&self, uri: &str) -> Option<SchemaNode<'s>> {
        self.by_uri.get(uri).map(|id| self.entries[id.0].node)
    }

    /// Look up a reference target.
    ///
    /// Falls back to walking the JSON pointer fragment from the enclosing document, which covers
    /// pointers that cross into an embedded resource.
    pub fn resolve(&self, uri: &str) -> Result<SchemaNode<'s>, SchemaError> {
        self.get(uri)
            .or_else(|| self.walk(uri))
            .ok_or_else(|| SchemaError::unresolved_ref(uri, self.uris()))
    }

    fn walk(&self, uri: &str) -> Option<SchemaNode<'s>> {
        let (document, pointer) = uri.split_once('#')?;
        let pointer = pointer.strip_prefix('/')?;
        let root = self.get(document)?.as_object()?;
        // Fragments are stored decoded, so the pointer is already in JSON pointer syntax
        let (head, tail) = pointer.find('/').map_or((pointer, ""), |idx| pointer.split_at(idx));
        let target = root.get(&unescape_token(head))?.pointer(tail)?;
        SchemaNode::new(target)
    }

    /// Annotations of a node, if the node was registered.
    pub fn annotations(&self, node: &SchemaNode<'_>) -> Option<&Annotations> {
        let id = self.by_address.get(&node.address()?)?;
        Some(&self.entries[id.0].annotations)
    }

    pub fn annotation(&self, node: &SchemaNode<'_>, name: Annotation) -> Option<&str> {
        self.annotations(node)?.get(name)
    }

    /// Whether `uri` was registered by a `$dynamicAnchor`.
    pub fn is_dynamic_anchor(&self, uri: &str) -> bool {
        self.dynamic_anchors.contains(uri)
    }

    pub(crate) fn insert(&mut self, uri: String, node: SchemaNode<'s>) -> Result<NodeId, SchemaError> {
        if self.by_uri.contains_key(&uri) {
            return Err(SchemaError::DuplicateSchemaUri { uri });
        }
        let id = self.entry_for(node);
        self.by_uri.insert(uri, id);
        Ok(id)
    }

    fn entry_for(&mut self, node: SchemaNode<'s>) -> NodeId {
        if let Some(address) = node.address() {
            if let Some(id) = self.by_address.get(&address) {
                return *id;
            }
            let id = self.push(node);
            self.by_address.insert(address, id);
            id
        } else {
            self.push(node)
        }
    }

    fn push(&mut self, node: SchemaNode<'s>) -> NodeId {
        self.entries.push(Entry {
            node,
            annotations: Annotations::default(),
        });
        NodeId(self.entries.len() - 1)
    }

    fn annotate(&self, id: NodeId, name: Annotation, value: String) {
        self.entries[id.0].annotations.annotate(name, value);
    }
}

/// Keywords whose values are never schemas.
const IGNORED: &[&str] = &[
    "id",
    "$id",
    "$schema",
    "$ref",
    "$recursiveRef",
    "$recursiveAnchor",
    "$dynamicRef",
    "$dynamicAnchor",
    "$anchor",
    "$vocabulary",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
    "enum",
    "const",
    "required",
    "type",
    "format",
    "pattern",
    "dependentRequired",
    "contentEncoding",
    "contentMediaType",
];
/// Keywords holding an array of schemas.
const IN_SUBARRAY: &[&str] = &["allOf", "anyOf", "oneOf", "prefixItems", "items"];
/// Keywords holding a map of schemas.
const IN_SUBVALUES: &[&str] = &[
    "$defs",
    "definitions",
    "dependencies",
    "dependentSchemas",
    "patternProperties",
    "properties",
];

/// Populates a [`SchemaIndex`] from a schema document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dereferencer {
    draft: Draft,
}

impl Dereferencer {
    pub fn new(draft: Draft) -> Self {
        Dereferencer { draft }
    }

    /// Register `node` and everything below it.
    ///
    /// `base` must not carry a fragment. `pointer` is the JSON pointer of `node` inside the
    /// resource identified by `base`, empty for the resource root.
    pub fn dereference<'s>(
        &self,
        index: &mut SchemaIndex<'s>,
        node: SchemaNode<'s>,
        base: &UriRef,
        pointer: &str,
    ) -> Result<(), SchemaError> {
        if let SchemaNode::Object(object) = node {
            if let Some(id) = id_of(self.draft, object) {
                let resolved = base.resolve(id)?;
                if resolved.has_plain_name_fragment() {
                    index.insert(resolved.href(), node)?;
                } else {
                    let base = resolved.without_fragment();
                    tracing::debug!(uri = %base, pointer, "Registering schema resource");
                    return self.visit(index, node, &base, "");
                }
            }
        }
        self.visit(index, node, base, pointer)
    }

    fn visit<'s>(
        &self,
        index: &mut SchemaIndex<'s>,
        node: SchemaNode<'s>,
        base: &UriRef,
        pointer: &str,
    ) -> Result<(), SchemaError> {
        let href = base.href();
        let location = if pointer.is_empty() {
            href.clone()
        } else {
            format!("{}#{}", href, pointer)
        };
        let id = index.insert(location, node)?;
        let object = match node {
            SchemaNode::Boolean(_) => return Ok(()),
            SchemaNode::Object(object) => object,
        };
        index.annotate(id, Annotation::AbsoluteUri, href);
        if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
            index.annotate(id, Annotation::AbsoluteRef, base.resolve(reference)?.href());
        }
        for keyword in ["$recursiveRef", "$dynamicRef"] {
            if let Some(reference) = object.get(keyword).and_then(Value::as_str) {
                let target = base.resolve(reference)?.href();
                index.annotate(id, Annotation::AbsoluteRecursiveRef, target);
            }
        }
        if self.draft >= Draft::Draft201909 {
            if let Some(anchor) = object.get("$anchor").and_then(Value::as_str) {
                tracing::trace!(uri = %base, anchor, "Registering anchor");
                index.insert(base.with_fragment(Some(anchor)).href(), node)?;
            }
            if let Some(anchor) = object.get("$dynamicAnchor").and_then(Value::as_str) {
                let uri = base.with_fragment(Some(anchor)).href();
                tracing::trace!(uri = %uri, "Registering dynamic anchor");
                // `$anchor` and `$dynamicAnchor` may share a name on the same node
                if index.by_uri.get(&uri) != Some(&id) {
                    index.insert(uri.clone(), node)?;
                }
                index.dynamic_anchors.insert(uri);
            }
        }
        for (keyword, value) in object {
            if IGNORED.contains(&keyword.as_str()) {
                continue;
            }
            let mut location = String::from(pointer);
            location.push('/');
            write_escaped_str(&mut location, keyword);
            match value {
                Value::Array(items) if IN_SUBARRAY.contains(&keyword.as_str()) => {
                    for (idx, item) in items.iter().enumerate() {
                        self.descend(index, item, base, &format!("{}/{}", location, idx))?;
                    }
                }
                Value::Object(map) if IN_SUBVALUES.contains(&keyword.as_str()) => {
                    for (name, item) in map {
                        let mut location = location.clone();
                        location.push('/');
                        write_escaped_str(&mut location, name);
                        self.descend(index, item, base, &location)?;
                    }
                }
                _ => self.descend(index, value, base, &location)?,
            }
        }
        Ok(())
    }

    fn descend<'s>(
        &self,
        index: &mut SchemaIndex<'s>,
        value: &'s Value,
        base: &UriRef,
        pointer: &str,
    ) -> Result<(), SchemaError> {
        match SchemaNode::new(value) {
            Some(node) => self.dereference(index, node, base, pointer),
            None => Ok(()),
        }
    }
}
