//! A single resolved configuration entry

use codec_fs::NormalizedPath;
use serde::Serialize;

use crate::value::Value;

/// Precedence tier a setting's current value came from. Later tiers win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Default,
    File,
    Cli,
    Interactive,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Cli => "cli",
            Self::Interactive => "interactive",
        };
        write!(f, "{label}")
    }
}

/// One resolved key with its value, origin and attached comments.
///
/// When a key is defined again, the new setting keeps the one it replaced in
/// `previous`, so the full override chain stays available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Canonical lower-case key.
    pub key: String,
    /// Display form used when writing the key back out.
    pub name: String,
    /// `None` when the key is known but has no value.
    pub value: Option<Value>,
    pub tier: Tier,
    /// Import chain the value was reached through; empty when it never came
    /// from a file.
    pub provenance: Vec<NormalizedPath>,
    pub leading_comments: Vec<String>,
    pub trailing_comment: Option<String>,
    pub previous: Option<Box<Setting>>,
}

impl Setting {
    pub fn new(name: &str, value: Option<Value>, tier: Tier) -> Self {
        Self {
            key: canonical_key(name),
            name: display_name(name),
            value,
            tier,
            provenance: Vec::new(),
            leading_comments: Vec::new(),
            trailing_comment: None,
            previous: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Vec<NormalizedPath>) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn with_comments(mut self, leading: Vec<String>, trailing: Option<String>) -> Self {
        self.leading_comments = leading;
        self.trailing_comment = trailing;
        self
    }

    /// File the current value was defined in.
    pub fn source_file(&self) -> Option<&NormalizedPath> {
        self.provenance.last()
    }

    /// Whether the current value came from an imported file.
    pub fn is_imported(&self) -> bool {
        self.provenance.len() > 1
    }

    /// This setting followed by every setting it overrode, newest first.
    pub fn history(&self) -> impl Iterator<Item = &Setting> {
        std::iter::successors(Some(self), |s| s.previous.as_deref())
    }
}

/// Lower-case storage form of a key.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Display form of a key.
///
/// Mixed-case names are kept as written. All-lower-case names get the first
/// letter of each `_`, `-` or space separated word capitalised.
pub fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.chars().any(char::is_uppercase) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = matches!(c, '_' | '-' | ' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_keeps_mixed_case() {
        assert_eq!(display_name("TargetDirectories"), "TargetDirectories");
    }

    #[test]
    fn test_display_name_capitalises_words() {
        assert_eq!(display_name("verbosity"), "Verbosity");
        assert_eq!(display_name("log_output"), "Log_Output");
        assert_eq!(display_name("job-count"), "Job-Count");
    }

    #[test]
    fn test_history_walks_override_chain() {
        let first = Setting::new("Verbosity", Some(Value::from("INFO")), Tier::Default);
        let mut second = Setting::new("verbosity", Some(Value::from("DEBUG")), Tier::File);
        second.previous = Some(Box::new(first));

        let tiers: Vec<Tier> = second.history().map(|s| s.tier).collect();
        assert_eq!(tiers, vec![Tier::File, Tier::Default]);
    }
}
