//! JSON value kinds as seen by the "type" keyword.
use serde_json::Value;
use std::{fmt, ops::BitOrAssign};

/// The seven type names accepted by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    /// Kind of a JSON value. Numbers are always reported as `Number`.
    pub fn of(value: &Value) -> PrimitiveType {
        match value {
            Value::Null => PrimitiveType::Null,
            Value::Bool(_) => PrimitiveType::Boolean,
            Value::Number(_) => PrimitiveType::Number,
            Value::String(_) => PrimitiveType::String,
            Value::Array(_) => PrimitiveType::Array,
            Value::Object(_) => PrimitiveType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Array => "array",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Number => "number",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            PrimitiveType::Array => 1,
            PrimitiveType::Boolean => 2,
            PrimitiveType::Integer => 4,
            PrimitiveType::Null => 8,
            PrimitiveType::Number => 16,
            PrimitiveType::Object => 32,
            PrimitiveType::String => 64,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

/// A compact set of primitive types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PrimitiveTypesBitMap {
    inner: u8,
}

impl PrimitiveTypesBitMap {
    pub(crate) const fn new() -> Self {
        Self { inner: 0 }
    }
    #[inline]
    pub(crate) fn contains(self, primitive_type: PrimitiveType) -> bool {
        self.inner & primitive_type.bit() != 0
    }
    pub(crate) fn iter(self) -> impl Iterator<Item = PrimitiveType> {
        [
            PrimitiveType::Array,
            PrimitiveType::Boolean,
            PrimitiveType::Integer,
            PrimitiveType::Null,
            PrimitiveType::Number,
            PrimitiveType::Object,
            PrimitiveType::String,
        ]
        .into_iter()
        .filter(move |primitive_type| self.contains(*primitive_type))
    }
}

impl BitOrAssign<PrimitiveType> for PrimitiveTypesBitMap {
    #[inline]
    fn bitor_assign(&mut self, rhs: PrimitiveType) {
        self.inner |= rhs.bit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!(null), PrimitiveType::Null)]
    #[test_case(&json!(true), PrimitiveType::Boolean)]
    #[test_case(&json!(1), PrimitiveType::Number)]
    #[test_case(&json!(1.5), PrimitiveType::Number)]
    #[test_case(&json!("a"), PrimitiveType::String)]
    #[test_case(&json!([]), PrimitiveType::Array)]
    #[test_case(&json!({}), PrimitiveType::Object)]
    fn kind_of_value(value: &Value, expected: PrimitiveType) {
        assert_eq!(PrimitiveType::of(value), expected)
    }

    #[test]
    fn bitmap_iteration_follows_declaration_order() {
        let mut types = PrimitiveTypesBitMap::new();
        types |= PrimitiveType::String;
        types |= PrimitiveType::Array;
        assert_eq!(
            types.iter().collect::<Vec<_>>(),
            vec![PrimitiveType::Array, PrimitiveType::String]
        );
        assert!(!types.contains(PrimitiveType::Null));
    }
}
