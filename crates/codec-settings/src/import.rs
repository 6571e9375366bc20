//! Recursive config file resolution
//!
//! A config file may pull in other files with `configfile = a.cfg, b.cfg`.
//! Resolution flattens the import tree into one ordered list of entries such
//! that applying them in order, last writer wins, gives the right precedence:
//!
//! - a file's own settings beat anything it imports
//! - a later import beats an earlier one
//!
//! Each walk carries an [`ImportHistory`]; a file that was already visited
//! anywhere in the walk is skipped, which bounds the recursion.

use codec_fs::{NormalizedPath, io};

use crate::error::Warning;
use crate::line::{ParsedLine, parse_line};
use crate::value::Value;

/// Reserved key naming files to import.
pub const IMPORT_KEY: &str = "configfile";

/// Key of the valueless placeholder holding comments found after the last
/// setting of a file. A real setting under the same key keeps its value.
pub const COMMENT_KEY: &str = "comment";

/// Files already visited during one resolution walk.
///
/// Paths are compared by canonical identity so different spellings of the
/// same file are caught.
#[derive(Debug, Default, Clone)]
pub struct ImportHistory {
    visited: Vec<NormalizedPath>,
}

impl ImportHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &NormalizedPath) -> bool {
        let identity = path.canonical();
        self.visited.contains(&identity)
    }

    fn record(&mut self, path: &NormalizedPath) {
        self.visited.push(path.canonical());
    }

    /// Visited files in visiting order.
    pub fn paths(&self) -> &[NormalizedPath] {
        &self.visited
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// One setting produced by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Key as written in the file.
    pub key: String,
    /// `None` only for the trailing-comment placeholder.
    pub value: Option<Value>,
    /// Import chain from the root file to the defining file.
    pub provenance: Vec<NormalizedPath>,
    /// Raw comment and blank lines directly above the definition.
    pub leading_comments: Vec<String>,
    pub trailing_comment: Option<String>,
}

impl ResolvedEntry {
    /// File the entry was defined in.
    pub fn source(&self) -> Option<&NormalizedPath> {
        self.provenance.last()
    }

    /// Whether the entry came from an imported file rather than the root.
    pub fn is_imported(&self) -> bool {
        self.provenance.len() > 1
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_none()
    }
}

/// Output of a resolution walk.
#[derive(Debug, Default, Clone)]
pub struct Resolution {
    pub entries: Vec<ResolvedEntry>,
    pub warnings: Vec<Warning>,
}

/// Resolve `path` and everything it imports with a fresh history.
pub fn resolve_file(path: &NormalizedPath) -> Resolution {
    let mut history = ImportHistory::new();
    resolve(path, &mut history)
}

/// Resolve `path` within an existing walk.
///
/// Every file read is recorded in `history`, so calling this again with the
/// same history never re-reads those files.
pub fn resolve(path: &NormalizedPath, history: &mut ImportHistory) -> Resolution {
    let mut resolution = Resolution::default();
    walk(path, &[], history, &mut resolution);
    resolution
}

fn walk(
    path: &NormalizedPath,
    chain: &[NormalizedPath],
    history: &mut ImportHistory,
    out: &mut Resolution,
) {
    if history.contains(path) {
        out.warnings.push(
            Warning::CircularImport {
                path: path.clone(),
            }
            .emit(),
        );
        return;
    }

    let content = match io::read_text(path) {
        Ok(content) => content,
        Err(e) => {
            out.warnings.push(
                Warning::MissingFile {
                    path: path.clone(),
                    reason: e.to_string(),
                }
                .emit(),
            );
            return;
        }
    };

    history.record(path);
    tracing::debug!("Reading config file {}", path);

    let mut provenance = chain.to_vec();
    provenance.push(path.clone());

    let mut direct = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        match parse_line(raw) {
            ParsedLine::Blank | ParsedLine::CommentOnly(_) => pending.push(raw.to_string()),
            ParsedLine::Malformed(reason) => out.warnings.push(
                Warning::MalformedLine {
                    path: path.clone(),
                    line: idx + 1,
                    reason,
                }
                .emit(),
            ),
            ParsedLine::KeyValue { key, value, .. } if key.eq_ignore_ascii_case(IMPORT_KEY) => {
                pending.clear();
                for target in import_targets(&value) {
                    let child = path.resolve_sibling(&target);
                    tracing::debug!("{} imports {}", path, child);
                    walk(&child, &provenance, history, out);
                }
            }
            ParsedLine::KeyValue {
                key,
                value,
                comment,
            } => direct.push(ResolvedEntry {
                key,
                value: Some(value),
                provenance: provenance.clone(),
                leading_comments: std::mem::take(&mut pending),
                trailing_comment: comment,
            }),
        }
    }

    if !pending.is_empty() {
        direct.push(ResolvedEntry {
            key: COMMENT_KEY.to_string(),
            value: None,
            provenance,
            leading_comments: pending,
            trailing_comment: None,
        });
    }

    out.entries.extend(direct);
}

/// File names named by an import directive, in listed order.
fn import_targets(value: &Value) -> Vec<String> {
    value
        .as_slice()
        .iter()
        .filter(|item| !item.is_null())
        .map(ToString::to_string)
        .collect()
}
