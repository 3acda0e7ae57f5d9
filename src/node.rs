//! Read-only view over schema values and the annotations attached to them.
use crate::error::SchemaError;
use once_cell::sync::OnceCell;
use serde_json::{map::Keys, Map, Value};
use std::{fmt, str::FromStr};

/// A schema is either a boolean or an object.
///
/// Nodes borrow the underlying JSON document. Object nodes have a stable identity: the address
/// of the map they wrap, which is what annotations are keyed by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'s> {
    Boolean(bool),
    Object(&'s Map<String, Value>),
}

/// Discriminant of [`SchemaNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Boolean,
    Object,
}

impl<'s> SchemaNode<'s> {
    /// Wrap a JSON value. Returns `None` for values that can't be schemas.
    pub fn new(value: &'s Value) -> Option<SchemaNode<'s>> {
        match value {
            Value::Bool(flag) => Some(SchemaNode::Boolean(*flag)),
            Value::Object(object) => Some(SchemaNode::Object(object)),
            _ => None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaNode::Boolean(_) => NodeKind::Boolean,
            SchemaNode::Object(_) => NodeKind::Object,
        }
    }

    /// Keyword lookup. Boolean schemas have no keywords.
    pub fn get(&self, keyword: &str) -> Option<&'s Value> {
        match self {
            SchemaNode::Boolean(_) => None,
            SchemaNode::Object(object) => object.get(keyword),
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Keywords of an object schema.
    pub fn keys(&self) -> Result<Keys<'s>, SchemaError> {
        match self {
            SchemaNode::Boolean(_) => Err(SchemaError::UnsupportedOperation { operation: "keys" }),
            SchemaNode::Object(object) => Ok(object.keys()),
        }
    }

    pub fn as_object(&self) -> Option<&'s Map<String, Value>> {
        match self {
            SchemaNode::Boolean(_) => None,
            SchemaNode::Object(object) => Some(object),
        }
    }

    /// `true` if the keyword is present and set to `true`.
    pub(crate) fn flag(&self, keyword: &str) -> bool {
        self.get(keyword).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Identity of an object node.
    pub(crate) fn address(&self) -> Option<usize> {
        self.as_object().map(address_of)
    }
}

pub(crate) fn address_of(object: &Map<String, Value>) -> usize {
    object as *const Map<String, Value> as usize
}

/// Names of the annotations computed by the dereferencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Absolute URI of the schema resource a node belongs to.
    AbsoluteUri,
    /// Resolved target of `$ref`.
    AbsoluteRef,
    /// Resolved target of `$recursiveRef` or `$dynamicRef`.
    AbsoluteRecursiveRef,
}

impl Annotation {
    pub fn as_str(self) -> &'static str {
        match self {
            Annotation::AbsoluteUri => "__absolute_uri__",
            Annotation::AbsoluteRef => "__absolute_ref__",
            Annotation::AbsoluteRecursiveRef => "__absolute_recursive_ref__",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annotation {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "__absolute_uri__" => Ok(Annotation::AbsoluteUri),
            "__absolute_ref__" => Ok(Annotation::AbsoluteRef),
            "__absolute_recursive_ref__" => Ok(Annotation::AbsoluteRecursiveRef),
            _ => Err(SchemaError::InvalidArgument {
                argument: s.to_string(),
            }),
        }
    }
}

/// Write-once annotation slots of a single node.
#[derive(Debug, Default)]
pub struct Annotations {
    absolute_uri: OnceCell<String>,
    absolute_ref: OnceCell<String>,
    absolute_recursive_ref: OnceCell<String>,
}

impl Annotations {
    fn slot(&self, name: Annotation) -> &OnceCell<String> {
        match name {
            Annotation::AbsoluteUri => &self.absolute_uri,
            Annotation::AbsoluteRef => &self.absolute_ref,
            Annotation::AbsoluteRecursiveRef => &self.absolute_recursive_ref,
        }
    }
    /// Store a value unless the slot is already set. Returns whether the value was stored.
    pub fn annotate(&self, name: Annotation, value: String) -> bool {
        self.slot(name).set(value).is_ok()
    }
    /// Same as [`Annotations::annotate`], with the annotation given by name.
    pub fn annotate_named(&self, name: &str, value: String) -> Result<bool, SchemaError> {
        Ok(self.annotate(name.parse()?, value))
    }
    pub fn get(&self, name: Annotation) -> Option<&str> {
        self.slot(name).get().map(String::as_str)
    }
}
