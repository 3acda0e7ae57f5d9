//! Checks for the `format` keyword.
use crate::{ecma, primitive_type::PrimitiveType};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::{net::IpAddr, str::FromStr};
use url::Url;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}\z").expect("Is a valid regex"));
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(?:[0-9]+W|(?:[0-9]+Y(?:[0-9]+M(?:[0-9]+D)?)?|[0-9]+M(?:[0-9]+D)?|[0-9]+D)(?:T(?:[0-9]+H(?:[0-9]+M(?:[0-9]+S)?)?|[0-9]+M(?:[0-9]+S)?|[0-9]+S))?|T(?:[0-9]+H(?:[0-9]+M(?:[0-9]+S)?)?|[0-9]+M(?:[0-9]+S)?|[0-9]+S))\z",
    )
    .expect("Is a valid regex")
});
static IRI_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("Is a valid regex")
});
static JSON_POINTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/(([^/~])|(~[01]))*)*\z").expect("Is a valid regex"));
static RELATIVE_JSON_POINTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0|[1-9][0-9]*)(?:#|(?:/(?:[^~/]|~0|~1)*)*)\z").expect("Is a valid regex")
});
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9]|60)(\.[0-9]+)?(([Zz])|([+\-]([01][0-9]|2[0-3]):[0-5][0-9]))\z",
    )
    .expect("Is a valid regex")
});
static URI_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("Is a valid regex")
});
static URI_TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:(?:[^\x00-\x20"'<>%\\^`{|}]|%[0-9a-f]{2})|\{[+#./;?&=,!@|]?(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?(?:,(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?)*})*\z"#,
    )
    .expect("Is a valid regex")
});
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\z")
        .expect("Is a valid regex")
});

/// Formats checked by [`DefaultFormatChecker`]. All of them apply to strings.
pub const STRING_FORMATS: &[&str] = &[
    "date",
    "date-time",
    "duration",
    "email",
    "hostname",
    "idn-email",
    "idn-hostname",
    "ipv4",
    "ipv6",
    "iri",
    "iri-reference",
    "json-pointer",
    "regex",
    "relative-json-pointer",
    "time",
    "uri",
    "uri-reference",
    "uri-template",
    "uuid",
];

/// Pluggable validation of `format` values.
pub trait FormatChecker: Send + Sync {
    /// `None` if `value` conforms to `format`, otherwise a description of the problem.
    fn check(&self, instance_type: PrimitiveType, format: &str, value: &Value) -> Option<String>;

    /// Whether `format` is meaningful for values of `instance_type`. Unsupported formats always
    /// pass.
    fn supports(&self, instance_type: PrimitiveType, format: &str) -> bool {
        instance_type == PrimitiveType::String && STRING_FORMATS.contains(&format)
    }
}

impl<F> FormatChecker for F
where
    F: Fn(PrimitiveType, &str, &Value) -> Option<String> + Send + Sync,
{
    fn check(&self, instance_type: PrimitiveType, format: &str, value: &Value) -> Option<String> {
        self(instance_type, format, value)
    }

    fn supports(&self, instance_type: PrimitiveType, _: &str) -> bool {
        instance_type == PrimitiveType::String
    }
}

/// Checks for the formats defined by the JSON Schema drafts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatChecker;

impl FormatChecker for DefaultFormatChecker {
    fn check(&self, _: PrimitiveType, format: &str, value: &Value) -> Option<String> {
        let string = value.as_str()?;
        let is_valid = match format {
            "date" => is_valid_date(string),
            "date-time" => DateTime::parse_from_rfc3339(string).is_ok(),
            "duration" => DURATION_RE.is_match(string),
            "email" | "idn-email" => is_valid_email(string),
            "hostname" => is_valid_hostname(string),
            "idn-hostname" => is_valid_idn_hostname(string),
            "ipv4" => matches!(IpAddr::from_str(string), Ok(IpAddr::V4(_))),
            "ipv6" => matches!(IpAddr::from_str(string), Ok(IpAddr::V6(_))),
            "iri" | "uri" => Url::from_str(string).is_ok(),
            "iri-reference" => IRI_REFERENCE_RE.is_match(string),
            "json-pointer" => JSON_POINTER_RE.is_match(string),
            "regex" => ecma::compile(string).is_ok(),
            "relative-json-pointer" => RELATIVE_JSON_POINTER_RE.is_match(string),
            "time" => TIME_RE.is_match(string),
            "uri-reference" => URI_REFERENCE_RE.is_match(string),
            "uri-template" => URI_TEMPLATE_RE.is_match(string),
            "uuid" => UUID_RE.is_match(string),
            _ => true,
        };
        if is_valid {
            None
        } else {
            Some(format!("{} is not a \"{}\"", value, format))
        }
    }
}

fn is_valid_date(string: &str) -> bool {
    DATE_RE.is_match(string) && NaiveDate::parse_from_str(string, "%Y-%m-%d").is_ok()
}

fn is_valid_email(string: &str) -> bool {
    match string.rsplit_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

fn is_valid_hostname(string: &str) -> bool {
    has_hostname_shape(string, char::is_ascii_alphanumeric)
}

/// Labels may hold any alphanumeric character as long as `idna` accepts the name.
fn is_valid_idn_hostname(string: &str) -> bool {
    has_hostname_shape(string, |c| c.is_alphanumeric())
        && idna::domain_to_unicode(string).1.is_ok()
}

fn has_hostname_shape(string: &str, is_label_char: impl Fn(&char) -> bool) -> bool {
    !(string.ends_with('-')
        || string.starts_with('-')
        || string.is_empty()
        || string.chars().count() > 255
        || string
            .chars()
            .any(|c| !(is_label_char(&c) || c == '-' || c == '.'))
        || string.split('.').any(|part| part.chars().count() > 63))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("date", "2020-02-29", true)]
    #[test_case("date", "2021-02-29", false)]
    #[test_case("date", "2020-2-9", false)]
    #[test_case("date-time", "1963-06-19T08:30:06.283185Z", true)]
    #[test_case("date-time", "06/19/1963 08:30:06 PST", false)]
    #[test_case("time", "08:30:06Z", true)]
    #[test_case("time", "08:30:06.5+01:00", true)]
    #[test_case("time", "8:30 AM", false)]
    #[test_case("duration", "P4DT12H30M5S", true)]
    #[test_case("duration", "P2W", true)]
    #[test_case("duration", "PT", false)]
    #[test_case("email", "joe.bloggs@example.com", true)]
    #[test_case("email", "2962", false)]
    #[test_case("hostname", "www.example.com", true)]
    #[test_case("hostname", "-a-host-name-that-starts-with--", false)]
    #[test_case("hostname", "\u{00E9}xample.com", false; "non ascii hostname")]
    #[test_case("idn-hostname", "\u{00E9}xample.com", true; "non ascii idn hostname")]
    #[test_case("ipv4", "192.168.0.1", true)]
    #[test_case("ipv4", "256.256.256.256", false)]
    #[test_case("ipv6", "::1", true)]
    #[test_case("ipv6", "12345::", false)]
    #[test_case("uri", "http://foo.bar/?baz=qux#quux", true)]
    #[test_case("uri", "//foo.bar/?baz=qux#quux", false)]
    #[test_case("uri-reference", "/abc", true)]
    #[test_case("json-pointer", "/foo/bar~0/baz~1/%a", true)]
    #[test_case("json-pointer", "/foo/bar~", false)]
    #[test_case("relative-json-pointer", "0/foo/bar", true)]
    #[test_case("relative-json-pointer", "-1/foo/bar", false)]
    #[test_case("regex", "([abc])+\\s+$", true)]
    #[test_case("regex", "^(abc]", false)]
    #[test_case("uuid", "2eb8aa08-aa98-11ea-b4aa-73b441d16380", true)]
    #[test_case("uuid", "2eb8aa08-aa98-11ea-b4aa-73b441d1638", false)]
    fn default_checks(format: &str, value: &str, expected: bool) {
        let value = json!(value);
        let result = DefaultFormatChecker.check(PrimitiveType::String, format, &value);
        assert_eq!(result.is_none(), expected, "{} / {}", format, value)
    }

    #[test]
    fn error_message() {
        let value = json!("nope");
        assert_eq!(
            DefaultFormatChecker.check(PrimitiveType::String, "ipv4", &value),
            Some(r#""nope" is not a "ipv4""#.to_string())
        )
    }

    #[test]
    fn supported_formats() {
        assert!(DefaultFormatChecker.supports(PrimitiveType::String, "date"));
        assert!(!DefaultFormatChecker.supports(PrimitiveType::String, "custom"));
        assert!(!DefaultFormatChecker.supports(PrimitiveType::Number, "date"));
    }

    #[test]
    fn closures_are_checkers() {
        let checker = |_: PrimitiveType, format: &str, value: &Value| {
            if format == "even-length" && value.as_str().map_or(0, str::len) % 2 == 1 {
                Some("odd".to_string())
            } else {
                None
            }
        };
        assert!(checker.supports(PrimitiveType::String, "even-length"));
        assert_eq!(
            checker.check(PrimitiveType::String, "even-length", &json!("abc")),
            Some("odd".to_string())
        );
    }
}
