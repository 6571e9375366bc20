//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries. `.` components and
/// duplicate separators are removed and `..` is folded into its parent,
/// so two spellings of the same location compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the current path entirely.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if is_absolute_str(&segment_normalized) || self.inner.is_empty() || self.inner == "." {
            return Self {
                inner: clean(&segment_normalized),
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Resolve `relative` against the directory containing this path.
    ///
    /// Used for import directives, which name files relative to the
    /// file that contains them.
    pub fn resolve_sibling(&self, relative: &str) -> Self {
        match self.parent() {
            Some(dir) => dir.join(relative),
            None => Self::new(relative),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this path is absolute (Unix root, drive letter, or UNC).
    pub fn is_absolute(&self) -> bool {
        is_absolute_str(&self.inner)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Canonical identity of this path.
    ///
    /// Resolves symlinks and relative components through the filesystem when
    /// the path exists; otherwise falls back to the lexical form.
    pub fn canonical(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(path) => Self::new(path),
            Err(_) => self.clone(),
        }
    }
}

/// Lexically clean a forward-slash path.
///
/// Collapses empty and `.` components and folds `..` into the preceding
/// component. Leading `..` components of relative paths are kept, and a
/// `..` directly under the root is dropped.
fn clean(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let (prefix, rest) = if let Some(rest) = path.strip_prefix("//").filter(|r| !r.starts_with('/'))
    {
        ("//", rest)
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        ("", path)
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if prefix.is_empty() => parts.push(".."),
                _ => {}
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (prefix, body.is_empty()) {
        ("", true) => ".".to_string(),
        (prefix, true) => prefix.to_string(),
        (prefix, false) => format!("{prefix}{body}"),
    }
}

fn is_absolute_str(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
