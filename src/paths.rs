//! Facilities for working with paths within schemas or validated instances.
use serde::{Serialize, Serializer};
use std::{fmt, sync::Arc};

/// A location segment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LocationSegment<'a> {
    /// Property name within a JSON object or a schema keyword.
    Property(&'a str),
    /// Index within a JSON array.
    Index(usize),
}

impl<'a> From<&'a str> for LocationSegment<'a> {
    #[inline]
    fn from(value: &'a str) -> LocationSegment<'a> {
        LocationSegment::Property(value)
    }
}

impl<'a> From<&'a String> for LocationSegment<'a> {
    #[inline]
    fn from(value: &'a String) -> LocationSegment<'a> {
        LocationSegment::Property(value)
    }
}

impl From<usize> for LocationSegment<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        LocationSegment::Index(value)
    }
}

/// A cheap to clone JSON pointer in fragment form, e.g. `#/properties/name`.
///
/// The root location is rendered as `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(Arc<String>);

impl Location {
    /// Create the root location.
    pub fn new() -> Self {
        Self(Arc::new(String::from("#")))
    }
    pub(crate) fn join<'a>(&self, segment: impl Into<LocationSegment<'a>>) -> Self {
        let parent = self.0.as_str();
        match segment.into() {
            LocationSegment::Property(property) => {
                let mut buffer = String::with_capacity(parent.len() + property.len() + 1);
                buffer.push_str(parent);
                buffer.push('/');
                write_escaped_str(&mut buffer, property);
                Self(Arc::new(buffer))
            }
            LocationSegment::Index(idx) => Self(Arc::new(format!("{}/{}", parent, idx))),
        }
    }
    /// Get a string slice representing the location.
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// The JSON pointer without the leading `#`.
    pub fn pointer(&self) -> &str {
        &self.0[1..]
    }
}

/// Append `value` to `buffer` as a single JSON pointer token.
pub(crate) fn write_escaped_str(buffer: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '~' => buffer.push_str("~0"),
            '/' => buffer.push_str("~1"),
            _ => buffer.push(ch),
        }
    }
}

/// Reverse of [`write_escaped_str`].
pub(crate) fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
