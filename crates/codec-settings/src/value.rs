//! Typed setting values and the text coercion grammar
//!
//! Every raw value in a config file is turned into a [`Value`] by [`coerce`].
//! Coercion never fails: anything that is not an integer, a list, a yes/no
//! token or a null token stays a string. Command-line arguments use
//! [`coerce_literal`], which skips lists and escapes.
//!
//! A backslash escapes the following character, so `\,` `\;` `\#` and `\=`
//! can appear literally inside a value and `\\` is a literal backslash.

use serde::Serialize;

/// Tokens read as `true` (compared case-insensitively).
pub const TRUTHY: &[&str] = &["y", "yes", "yeah", "always", "sure", "definitely", "yup", "true"];

/// Tokens read as `false` (compared case-insensitively).
pub const FALSY: &[&str] = &["n", "no", "nope", "never", "nah", "false"];

/// Tokens read as null (compared case-insensitively).
pub const NULLISH: &[&str] = &["", "none"];

const ESCAPE: char = '\\';

/// A coerced setting value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Sequence(Vec<Value>),
}

impl Value {
    /// Coerce raw text into a typed value. See [`coerce`].
    pub fn coerce(raw: &str) -> Self {
        coerce(raw)
    }

    /// Build a value from a list of items.
    ///
    /// An empty list is `Null` and a single item is returned unwrapped, which
    /// matches what coercing the comma-joined text would produce.
    pub fn from_items(mut items: Vec<Value>) -> Self {
        match items.len() {
            0 => Self::Null,
            1 => items.remove(0),
            _ => Self::Sequence(items),
        }
    }

    /// View the value as a list: sequences yield their items, `Null` yields
    /// nothing and any scalar yields itself.
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Self::Sequence(items) => items,
            Self::Null => &[],
            other => std::slice::from_ref(other),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the value in config-file syntax.
    ///
    /// The output coerces back to an equal value: strings are escaped and a
    /// string that would otherwise read as another type gets a leading
    /// backslash.
    pub fn render(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Null => "none".to_string(),
            Self::String(s) => render_string(s),
            Self::Sequence(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "none"),
            Self::String(s) => write!(f, "{s}"),
            Self::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::from_items(items.into_iter().map(Into::into).collect())
    }
}

/// Coerce raw text into a typed value.
///
/// Rules, in order:
/// 1. the trimmed text is a base-10 integer: `Integer`
/// 2. splitting on unescaped `,`/`;` leaves two or more non-empty segments:
///    `Sequence` of each segment coerced; a single leftover segment is
///    coerced on its own and no segments at all is `Null`
/// 3. a yes/no/none token: `Boolean` or `Null`
/// 4. anything else: `String` with escapes removed and case preserved
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Integer(n);
    }

    let segments = split_unescaped(trimmed, is_list_separator);
    if segments.len() > 1 {
        let parts: Vec<&str> = segments
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        return match parts.as_slice() {
            [] => Value::Null,
            [single] => coerce(single),
            _ => Value::Sequence(parts.iter().map(|p| coerce(p)).collect()),
        };
    }

    let lowered = trimmed.to_lowercase();
    let token = lowered.as_str();
    if TRUTHY.contains(&token) {
        Value::Boolean(true)
    } else if FALSY.contains(&token) {
        Value::Boolean(false)
    } else if NULLISH.contains(&token) {
        Value::Null
    } else {
        Value::String(unescape(trimmed))
    }
}

/// Coerce a single value taken verbatim, e.g. one command-line argument.
///
/// Like [`coerce`] but the text is never split into a list and backslashes
/// are kept as written.
pub fn coerce_literal(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Integer(n);
    }

    let lowered = trimmed.to_lowercase();
    let token = lowered.as_str();
    if TRUTHY.contains(&token) {
        Value::Boolean(true)
    } else if FALSY.contains(&token) {
        Value::Boolean(false)
    } else if NULLISH.contains(&token) {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

fn is_list_separator(c: char) -> bool {
    c == ',' || c == ';'
}

/// Split `text` at every unescaped character matching `is_sep`.
///
/// Escapes are left in place in the returned slices.
pub(crate) fn split_unescaped(text: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if is_sep(c) {
            parts.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte offsets of every unescaped occurrence of `target` in `text`.
pub(crate) fn find_unescaped(text: &str, target: char) -> Vec<usize> {
    let mut found = Vec::new();
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == target {
            found.push(idx);
        }
    }
    found
}

/// Remove one level of backslash escaping. A trailing lone backslash is kept.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ESCAPE),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape every character that has meaning in a config line.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '#' | '=' | ',' | ';') {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

fn render_string(s: &str) -> String {
    let escaped = escape(s);
    if coerce(&escaped) == Value::String(s.to_string()) {
        escaped
    } else {
        // e.g. "42", "yes" or leading whitespace: force the string reading
        format!("{ESCAPE}{escaped}")
    }
}
