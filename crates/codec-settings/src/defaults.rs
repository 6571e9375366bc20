//! Built-in default settings

use std::path::Path;

use crate::setting::canonical_key;
use crate::value::Value;

/// Name of the config file read when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".codecfile";

/// Ordered table of default values, keyed case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    entries: Vec<(String, Value)>,
}

impl Defaults {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tool's built-in defaults, with the working directory as target.
    pub fn builtin() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
        Self::builtin_in(&cwd)
    }

    /// The tool's built-in defaults with `cwd` as the target directory.
    pub fn builtin_in(cwd: &Path) -> Self {
        Self::new()
            .with("TargetDirectories", cwd.to_string_lossy().into_owned())
            .with("IgnoredDirectories", Value::Null)
            .with("FlatDirectories", Value::Null)
            .with("TargetFileTypes", Value::Null)
            .with("IgnoredFileTypes", ".gitignore")
            .with("Filters", Value::Null)
            .with("IgnoredFilters", Value::Null)
            .with("RegexFilters", Value::Null)
            .with("FileOkColor", "bright red")
            .with("FileBadColor", "bright green")
            .with("FilterColor", "grey")
            .with("ErrorResultColor", "red")
            .with("WarningResultColor", "yellow")
            .with("InfoResultColor", "normal")
            .with("DebugResultColor", "cyan")
            .with("LogType", "CONSOLE")
            .with("LogOutput", Value::Null)
            .with("Verbosity", "INFO")
            .with("ConfigFile", DEFAULT_CONFIG_FILE)
            .with("Save", Value::Null)
            .with("JobCount", Value::Null)
    }

    /// Add or replace a default.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        let key = canonical_key(name);
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name.trim().to_string(), value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(&canonical_key(key)).map(|idx| &self.entries[idx].1)
    }

    /// Display name a default was declared with.
    pub fn name_of(&self, key: &str) -> Option<&str> {
        self.position(&canonical_key(key))
            .map(|idx| self.entries[idx].0.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(name, _)| canonical_key(name) == key)
    }
}
