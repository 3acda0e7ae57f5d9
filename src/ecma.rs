//! ECMA 262 flavoured regular expressions.
//!
//! Patterns go through `fancy-regex`, which handles look-arounds and backreferences. Shorthand
//! classes are rewritten first: ECMA 262 `\d` and `\w` are ASCII-only, while `\s` covers a fixed
//! set of whitespace and line terminators that differs from the Unicode one.
use crate::error::SchemaError;
use ahash::AHashMap;
use fancy_regex::Regex;
use parking_lot::RwLock;
use std::{borrow::Cow, sync::Arc};

/// Compiled patterns shared between validation runs.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: RwLock<AHashMap<String, Arc<Regex>>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled form of `pattern`, built on first use.
    pub(crate) fn get(&self, pattern: &str) -> Result<Arc<Regex>, SchemaError> {
        if let Some(regex) = self.compiled.read().get(pattern) {
            return Ok(Arc::clone(regex));
        }
        let regex = Arc::new(compile(pattern)?);
        self.compiled
            .write()
            .insert(pattern.to_string(), Arc::clone(&regex));
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }
}

const DIGIT: &str = "0-9";
const WORD: &str = "A-Za-z0-9_";
const SPACE: &str =
    r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

pub(crate) fn compile(pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(&translate(pattern)).map_err(|error| SchemaError::InvalidRegex {
        pattern: pattern.to_string(),
        error: error.to_string(),
    })
}

fn translate(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains('\\') {
        return Cow::Borrowed(pattern);
    }
    let mut output = String::with_capacity(pattern.len() + 16);
    let mut in_class = false;
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(shorthand @ ('d' | 'D' | 'w' | 'W' | 's' | 'S')) => {
                    push_shorthand(&mut output, shorthand, in_class)
                }
                Some('c') => match chars.peek().copied() {
                    Some(letter) if letter.is_ascii_alphabetic() => {
                        chars.next();
                        output.push_str(&format!("\\x{:02X}", (letter as u8) % 32));
                    }
                    _ => output.push_str("\\c"),
                },
                Some(other) => {
                    output.push('\\');
                    output.push(other);
                }
                None => output.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                output.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    output.push('^');
                }
            }
            ']' if in_class => {
                in_class = false;
                output.push(']');
            }
            _ => output.push(ch),
        }
    }
    Cow::Owned(output)
}

/// Inside a class, positive shorthands are spliced in as ranges and negated ones become nested
/// classes.
fn push_shorthand(output: &mut String, shorthand: char, in_class: bool) {
    let ranges = match shorthand.to_ascii_lowercase() {
        'd' => DIGIT,
        'w' => WORD,
        _ => SPACE,
    };
    let negated = shorthand.is_ascii_uppercase();
    if in_class && !negated {
        output.push_str(ranges);
        return;
    }
    output.push_str(if negated { "[^" } else { "[" });
    output.push_str(ranges);
    output.push(']');
}
