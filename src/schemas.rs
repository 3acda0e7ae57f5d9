use serde_json::{Map, Value};

/// JSON Schema drafts understood by the engine.
///
/// Drafts are ordered by release, so `draft >= Draft::Draft201909` reads as
/// "2019-09 or later". Draft 6 schemas are handled as Draft 7.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub enum Draft {
    Draft4,
    Draft7,
    Draft201909,
    #[default]
    Draft202012,
}

impl Draft {
    /// Keyword that carries the schema identifier.
    pub(crate) fn id_keyword(self) -> &'static str {
        if self == Draft::Draft4 {
            "id"
        } else {
            "$id"
        }
    }
    /// Before 2019-09 `$ref` replaces every sibling keyword.
    pub(crate) fn ref_overrides_siblings(self) -> bool {
        self <= Draft::Draft7
    }
}

/// Get the `Draft` from a JSON Schema URL.
pub fn draft_from_url(url: &str) -> Option<Draft> {
    match url.trim_end_matches('#') {
        "https://json-schema.org/draft/2020-12/schema" => Some(Draft::Draft202012),
        "https://json-schema.org/draft/2019-09/schema" => Some(Draft::Draft201909),
        "http://json-schema.org/draft-07/schema" => Some(Draft::Draft7),
        "http://json-schema.org/draft-06/schema" => Some(Draft::Draft7),
        "http://json-schema.org/draft-04/schema" => Some(Draft::Draft4),
        _ => None,
    }
}

/// Get the `Draft` from a JSON Schema.
pub fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema
        .as_object()
        .and_then(|x| x.get("$schema"))
        .and_then(Value::as_str)
        .and_then(draft_from_url)
}

/// Identifier of a schema object, if it has one.
///
/// Before 2019-09 an identifier next to `$ref` is ignored.
pub(crate) fn id_of(draft: Draft, object: &Map<String, Value>) -> Option<&str> {
    if draft.ref_overrides_siblings() && object.contains_key("$ref") {
        return None;
    }
    object.get(draft.id_keyword()).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"$schema": "https://json-schema.org/draft/2020-12/schema"}), Some(Draft::Draft202012))]
    #[test_case(json!({"$schema": "https://json-schema.org/draft/2019-09/schema#"}), Some(Draft::Draft201909))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-07/schema#"}), Some(Draft::Draft7))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-06/schema#"}), Some(Draft::Draft7))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Some(Draft::Draft4))]
    #[test_case(json!({"$schema": "http://example.com/custom/schema#"}), None)]
    #[test_case(json!(true), None)]
    fn test_draft_from_schema(schema: Value, draft: Option<Draft>) {
        assert_eq!(draft_from_schema(&schema), draft)
    }

    #[test]
    fn drafts_are_ordered() {
        assert!(Draft::Draft4 < Draft::Draft7);
        assert!(Draft::Draft7 < Draft::Draft201909);
        assert!(Draft::Draft201909 < Draft::Draft202012);
        assert_eq!(Draft::default(), Draft::Draft202012);
    }

    #[test_case(Draft::Draft4, json!({"id": "a.json"}), Some("a.json"))]
    #[test_case(Draft::Draft4, json!({"$id": "a.json"}), None)]
    #[test_case(Draft::Draft7, json!({"$id": "a.json", "$ref": "#/definitions/x"}), None)]
    #[test_case(Draft::Draft201909, json!({"$id": "a.json", "$ref": "#/$defs/x"}), Some("a.json"))]
    fn identifiers(draft: Draft, schema: Value, expected: Option<&str>) {
        let object = schema.as_object().expect("Object");
        assert_eq!(id_of(draft, object), expected)
    }
}
