//! Parsing of single config-file lines
//!
//! A line is one of: blank, a comment, a `key = value` pair with an optional
//! trailing comment, or malformed. `#` starts a comment and `=` separates the
//! key from the value unless either is escaped with a backslash.

use crate::value::{self, Value};

/// Why a line could not be read as a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Text without any `=`.
    NoSeparator,
    /// More than one unescaped `=`.
    MultipleSeparators(usize),
    /// Nothing before the `=`.
    EmptyKey,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSeparator => write!(f, "expected `key = value`"),
            Self::MultipleSeparators(n) => write!(f, "found {n} unescaped `=`, expected one"),
            Self::EmptyKey => write!(f, "missing key before `=`"),
        }
    }
}

/// The result of parsing one physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Blank,
    /// A line holding only a comment. The text excludes the `#`.
    CommentOnly(String),
    KeyValue {
        /// Key as written (trimmed, unescaped).
        key: String,
        value: Value,
        comment: Option<String>,
    },
    Malformed(MalformedReason),
}

impl ParsedLine {
    /// Lower-case key of a `key = value` line.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::KeyValue { key, .. } => Some(key.to_lowercase()),
            _ => None,
        }
    }

    /// Whether the line carries no setting (blank or comment).
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Blank | Self::CommentOnly(_))
    }
}

/// Parse one physical line. Line terminators are ignored.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }

    let (body, comment) = match value::find_unescaped(line, '#').first() {
        Some(&idx) => (&line[..idx], Some(line[idx + 1..].trim().to_string())),
        None => (line, None),
    };

    if body.trim().is_empty() {
        return ParsedLine::CommentOnly(comment.unwrap_or_default());
    }

    let separators = value::find_unescaped(body, '=');
    match separators.as_slice() {
        [] => ParsedLine::Malformed(MalformedReason::NoSeparator),
        [idx] => {
            let key = value::unescape(body[..*idx].trim());
            if key.is_empty() {
                return ParsedLine::Malformed(MalformedReason::EmptyKey);
            }
            ParsedLine::KeyValue {
                key,
                value: value::coerce(&body[idx + 1..]),
                comment,
            }
        }
        many => ParsedLine::Malformed(MalformedReason::MultipleSeparators(many.len())),
    }
}
