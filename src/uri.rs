//! URI references used as canonical schema identifiers.
//!
//! Parsing, resolution and normalization are done by `fluent-uri`. On top of it, fragments are
//! kept percent-decoded and outside of the parsed reference, so `#/a%25b` and `#/a%b` name the
//! same location and JSON pointers don't need to be valid URI fragments.
use crate::error::SchemaError;
use fluent_uri::Uri;
use percent_encoding::percent_decode_str;
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// A parsed URI reference.
#[derive(Debug, Clone)]
pub struct UriRef {
    reference: fluent_uri::UriRef<String>,
    fragment: Option<String>,
}

impl UriRef {
    /// Parse a URI reference.
    ///
    /// In strict mode a scheme is required, and so is a non-empty host unless the scheme is
    /// `file` or `urn`.
    pub fn parse(input: &str, strict: bool) -> Result<UriRef, SchemaError> {
        let (head, fragment) = split_fragment(input);
        let reference = fluent_uri::UriRef::parse(head)
            .map_err(|_| SchemaError::invalid_url(input, "not a URI reference"))?
            .normalize();
        let uri = UriRef {
            reference,
            fragment: fragment.and_then(normalize_fragment),
        };
        if let Some(authority) = uri.reference.authority() {
            if let Some(port) = authority.port().map(|port| port.as_str()) {
                if !port.is_empty() && port.parse::<u16>().is_err() {
                    return Err(SchemaError::invalid_url(input, "invalid port"));
                }
            }
        }
        if strict {
            match uri.scheme() {
                None => return Err(SchemaError::invalid_url(input, "missing scheme")),
                Some("file") | Some("urn") => {}
                Some(_) if uri.host().map_or(true, str::is_empty) => {
                    return Err(SchemaError::invalid_url(input, "missing host"))
                }
                Some(_) => {}
            }
        }
        Ok(uri)
    }

    /// Resolve `reference` against `self` following RFC 3986 section 5.2.
    pub fn resolve(&self, reference: &str) -> Result<UriRef, SchemaError> {
        let (head, fragment) = split_fragment(reference);
        let fragment = fragment.and_then(normalize_fragment);
        if head.is_empty() {
            return Ok(UriRef {
                reference: self.reference.clone(),
                fragment,
            });
        }
        let relative = fluent_uri::UriRef::parse(head)
            .map_err(|_| SchemaError::invalid_url(reference, "not a URI reference"))?;
        let base = Uri::parse(self.reference.as_str())
            .map_err(|_| SchemaError::invalid_url(self.href(), "not an absolute base URI"))?;
        let reference = relative
            .resolve_against(&base)
            .map_err(|_| SchemaError::invalid_url(reference, "can't be resolved"))?
            .normalize()
            .into();
        Ok(UriRef {
            reference,
            fragment,
        })
    }

    /// Canonical textual form.
    ///
    /// With an authority the path defaults to `/`. Empty query and fragment are omitted.
    pub fn href(&self) -> String {
        let mut output = String::with_capacity(self.reference.as_str().len() + 8);
        if let Some(scheme) = self.scheme() {
            output.push_str(scheme);
            output.push(':');
        }
        if let Some(authority) = self.reference.authority() {
            output.push_str("//");
            output.push_str(authority.as_str());
            if self.path().is_empty() {
                output.push('/');
            }
        }
        output.push_str(self.path());
        if let Some(query) = self.query() {
            output.push('?');
            output.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            output.push('#');
            output.push_str(fragment);
        }
        output
    }

    /// A copy of this URI with the fragment replaced.
    pub fn with_fragment(&self, fragment: Option<&str>) -> UriRef {
        UriRef {
            reference: self.reference.clone(),
            fragment: fragment.and_then(normalize_fragment),
        }
    }

    pub fn without_fragment(&self) -> UriRef {
        self.with_fragment(None)
    }

    /// Whether the fragment is a location-independent name rather than a JSON pointer.
    pub fn has_plain_name_fragment(&self) -> bool {
        self.fragment
            .as_deref()
            .map_or(false, |fragment| !fragment.starts_with('/'))
    }

    pub fn scheme(&self) -> Option<&str> {
        self.reference.scheme().map(|scheme| scheme.as_str())
    }
    pub fn host(&self) -> Option<&str> {
        self.reference.authority().map(|authority| authority.host())
    }
    pub fn port(&self) -> Option<u16> {
        self.reference
            .authority()?
            .port()
            .and_then(|port| port.as_str().parse().ok())
    }
    pub fn path(&self) -> &str {
        self.reference.path().as_str()
    }
    pub fn query(&self) -> Option<&str> {
        self.reference
            .query()
            .map(|query| query.as_str())
            .filter(|query| !query.is_empty())
    }
    /// Percent-decoded fragment, absent when empty.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl PartialEq for UriRef {
    fn eq(&self, other: &Self) -> bool {
        self.href() == other.href()
    }
}

impl Eq for UriRef {}

impl Hash for UriRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.href().hash(state)
    }
}

impl FromStr for UriRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriRef::parse(s, true)
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

fn split_fragment(input: &str) -> (&str, Option<&str>) {
    match input.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (input, None),
    }
}

fn normalize_fragment(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.com/root.json")]
    #[test_case("https://example.com:8443/a/b?x=1")]
    #[test_case("file:///tmp/schema.json")]
    #[test_case("urn:uuid:deadbeef-1234-00ff-ff00-4321feebdaed")]
    fn strict_accepts(input: &str) {
        assert!(UriRef::parse(input, true).is_ok(), "{}", input)
    }

    #[test_case("foo/bar"; "no scheme")]
    #[test_case("#/definitions/a"; "fragment only")]
    #[test_case("http:/path"; "no host")]
    #[test_case("tag:example"; "no authority")]
    #[test_case("http://exa mple.com/"; "space in host")]
    fn strict_rejects(input: &str) {
        assert!(matches!(
            UriRef::parse(input, true),
            Err(SchemaError::InvalidUrl { .. })
        ))
    }

    #[test]
    fn relative_parses_leniently() {
        let uri = UriRef::parse("foo/bar.json#/a", false).expect("Valid reference");
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.path(), "foo/bar.json");
        assert_eq!(uri.fragment(), Some("/a"));
    }

    #[test]
    fn components() {
        let uri = UriRef::parse("HTTP://Example.COM:8080/a/b?q=1#frag", true).expect("Valid URI");
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.host(), Some("example.com"));
        assert_eq!(uri.port(), Some(8080));
        assert_eq!(uri.path(), "/a/b");
        assert_eq!(uri.query(), Some("q=1"));
        assert_eq!(uri.fragment(), Some("frag"));
    }

    #[test]
    fn invalid_port() {
        assert!(UriRef::parse("http://example.com:port/", true).is_err())
    }

    #[test_case("http://example.com", "http://example.com/")]
    #[test_case("http://example.com/a?", "http://example.com/a")]
    #[test_case("http://example.com/a#", "http://example.com/a")]
    #[test_case("urn:example:thing", "urn:example:thing")]
    #[test_case("file:///tmp/x.json", "file:///tmp/x.json")]
    fn href(input: &str, expected: &str) {
        assert_eq!(
            UriRef::parse(input, true).expect("Valid URI").href(),
            expected
        )
    }

    #[test_case("http://a/b/c/d;p?q", "g", "http://a/b/c/g")]
    #[test_case("http://a/b/c/d;p?q", "./g", "http://a/b/c/g")]
    #[test_case("http://a/b/c/d;p?q", "g/", "http://a/b/c/g/")]
    #[test_case("http://a/b/c/d;p?q", "/g", "http://a/g")]
    #[test_case("http://a/b/c/d;p?q", "//g", "http://g/")]
    #[test_case("http://a/b/c/d;p?q", "?y", "http://a/b/c/d;p?y")]
    #[test_case("http://a/b/c/d;p?q", "#s", "http://a/b/c/d;p?q#s")]
    #[test_case("http://a/b/c/d;p?q", "", "http://a/b/c/d;p?q")]
    #[test_case("http://a/b/c/d;p?q", "..", "http://a/b/")]
    #[test_case("http://a/b/c/d;p?q", "../../g", "http://a/g")]
    #[test_case("http://a/b/c/d;p?q", "../../../g", "http://a/g")]
    #[test_case("http://a/b/c/d;p?q", "g/../h", "http://a/b/c/h")]
    #[test_case("http://a/b/c/d;p?q", "./", "http://a/b/c/")]
    #[test_case("http://a/b/c/d;p?q", "https://other/x.json", "https://other/x.json")]
    #[test_case("http://example.com/a/b.json", "/../c.json", "http://example.com/c.json")]
    #[test_case("http://example.com", "item.json", "http://example.com/item.json")]
    #[test_case("urn:example:root", "#foo", "urn:example:root#foo")]
    fn resolution(base: &str, reference: &str, expected: &str) {
        let base = UriRef::parse(base, true).expect("Valid base");
        assert_eq!(
            base.resolve(reference).expect("Valid reference").href(),
            expected
        )
    }

    #[test]
    fn absolute_reference_is_returned_as_is() {
        let base = UriRef::parse("http://example.com/root.json", true).expect("Valid base");
        let target = base
            .resolve("http://other.com/item.json#/definitions/a")
            .expect("Valid reference");
        assert_eq!(target.href(), "http://other.com/item.json#/definitions/a");
    }

    #[test_case("#/definitions/percent%25field", "/definitions/percent%field")]
    #[test_case("#/definitions/foo%22bar", "/definitions/foo\"bar")]
    #[test_case("#foo", "foo")]
    #[test_case("#/definitions/a b", "/definitions/a b"; "raw characters in pointers")]
    fn fragment_is_decoded(reference: &str, expected: &str) {
        let uri = UriRef::parse(reference, false).expect("Valid reference");
        assert_eq!(uri.fragment(), Some(expected))
    }

    #[test_case("#foo", true)]
    #[test_case("#/foo", false)]
    #[test_case("#", false)]
    #[test_case("a.json", false)]
    fn plain_name_fragments(reference: &str, expected: bool) {
        let uri = UriRef::parse(reference, false).expect("Valid reference");
        assert_eq!(uri.has_plain_name_fragment(), expected)
    }

    #[test]
    fn fragment_replacement() {
        let uri = UriRef::parse("http://example.com/a#x", true).expect("Valid URI");
        assert_eq!(uri.without_fragment().href(), "http://example.com/a");
        assert_eq!(
            uri.with_fragment(Some("/b")).href(),
            "http://example.com/a#/b"
        );
    }

    #[test]
    fn equality_follows_the_canonical_form() {
        let first = UriRef::parse("HTTP://Example.com", true).expect("Valid URI");
        let second = UriRef::parse("http://example.com/#", true).expect("Valid URI");
        assert_eq!(first, second);
    }
}
