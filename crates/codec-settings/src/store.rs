//! The resolved settings store
//!
//! [`Settings`] merges three tiers, lowest first:
//!
//! 1. built-in [`Defaults`]
//! 2. the root config file and everything it imports
//! 3. command-line overrides, for flags that were actually given
//!
//! Keys are case-insensitive everywhere. Lookups distinguish a key that has
//! no value at all (`None`) from one explicitly holding [`Value::Null`].

use std::collections::HashMap;

use codec_fs::NormalizedPath;

use crate::defaults::Defaults;
use crate::error::Warning;
use crate::import::{self, IMPORT_KEY};
use crate::setting::{Setting, Tier, canonical_key};
use crate::value::Value;

/// Reserved key requesting a save after resolution.
pub const SAVE_KEY: &str = "save";

/// Values supplied on the command line.
///
/// A flag that was not given is recorded as `None` (or `Null`) and never
/// takes part in the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    entries: Vec<(String, Option<Value>)>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Option<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Record a flag, replacing an earlier value for the same key.
    pub fn insert(&mut self, name: &str, value: Option<Value>) {
        let key = canonical_key(name);
        match self.entries.iter_mut().find(|(n, _)| canonical_key(n) == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.trim().to_string(), value)),
        }
    }

    /// Value of a flag that was given with a non-null value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = canonical_key(key);
        self.present()
            .find(|(name, _)| canonical_key(name) == key)
            .map(|(_, value)| value)
    }

    /// Flags that were given with a non-null value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(name, value)| match value {
            Some(v) if !v.is_null() => Some((name.as_str(), v)),
            _ => None,
        })
    }
}

/// Ordered, case-insensitive store of resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    defaults: Defaults,
    origin: Option<NormalizedPath>,
    entries: Vec<Setting>,
    index: HashMap<String, usize>,
    warnings: Vec<Warning>,
}

impl Settings {
    /// A store holding only the defaults tier.
    pub fn new(defaults: Defaults) -> Self {
        let mut settings = Self {
            defaults: Defaults::new(),
            origin: None,
            entries: Vec::new(),
            index: HashMap::new(),
            warnings: Vec::new(),
        };
        for (name, value) in defaults.iter() {
            settings.set(Setting::new(name, Some(value.clone()), Tier::Default));
        }
        settings.defaults = defaults;
        settings
    }

    /// Resolve all three tiers.
    ///
    /// The root config file is the `ConfigFile` given on the command line,
    /// or else the default `ConfigFile`.
    pub fn load(defaults: Defaults, cli: &CliOverrides) -> Self {
        let config_file = cli
            .get(IMPORT_KEY)
            .or_else(|| defaults.get(IMPORT_KEY))
            .and_then(first_path);

        match config_file {
            Some(path) => Self::load_from(defaults, &path, cli),
            None => {
                tracing::debug!("No config file configured, using defaults and flags only");
                let mut settings = Self::new(defaults);
                settings.apply_cli(cli);
                settings
            }
        }
    }

    /// Resolve all three tiers with an explicit root config file.
    pub fn load_from(defaults: Defaults, config_file: &NormalizedPath, cli: &CliOverrides) -> Self {
        let mut settings = Self::new(defaults);
        settings.apply_file(config_file);
        settings.apply_cli(cli);
        settings
    }

    fn apply_file(&mut self, path: &NormalizedPath) {
        let resolution = import::resolve_file(path);
        tracing::debug!(
            "Resolved {} entries from {} ({} warnings)",
            resolution.entries.len(),
            path,
            resolution.warnings.len()
        );

        for entry in resolution.entries {
            let setting = Setting::new(&entry.key, entry.value, Tier::File)
                .with_provenance(entry.provenance)
                .with_comments(entry.leading_comments, entry.trailing_comment);
            self.set(setting);
        }
        self.warnings.extend(resolution.warnings);
        self.origin = Some(path.clone());
    }

    fn apply_cli(&mut self, cli: &CliOverrides) {
        for (name, value) in cli.present() {
            tracing::debug!("Command line sets {} = {}", name, value);
            self.set(Setting::new(name, Some(value.clone()), Tier::Cli));
        }
    }

    /// Insert a setting or override an existing one.
    ///
    /// An overridden setting is kept as the new one's `previous`, and the
    /// display name first seen for the key is retained. A setting without a
    /// value never replaces one that has a value.
    pub fn set(&mut self, mut setting: Setting) {
        match self.index.get(&setting.key).copied() {
            Some(idx) => {
                let slot = &mut self.entries[idx];
                if setting.value.is_none() && slot.value.is_some() {
                    tracing::debug!("Keeping {} over a valueless entry", slot.name);
                    return;
                }
                setting.name = slot.name.clone();
                let previous = std::mem::replace(slot, setting);
                slot.previous = Some(Box::new(previous));
            }
            None => {
                if let Some(name) = self.defaults.name_of(&setting.key) {
                    setting.name = name.to_string();
                }
                self.index.insert(setting.key.clone(), self.entries.len());
                self.entries.push(setting);
            }
        }
    }

    /// Set a value supplied at runtime, e.g. from an interactive prompt.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.set(Setting::new(name, Some(value), Tier::Interactive));
    }

    /// Resolved value for `key`.
    ///
    /// `None` means the key is unknown or has no value; an explicit null is
    /// `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.setting(key).and_then(|s| s.value.as_ref())
    }

    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.index
            .get(&canonical_key(key))
            .map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&canonical_key(key))
    }

    /// Built-in default for `key`, if it has one.
    pub fn default_of(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Whether the resolved value of `key` equals its default.
    pub fn is_default(&self, key: &str) -> bool {
        match (self.get(key), self.default_of(key)) {
            (Some(value), Some(default)) => value == default,
            _ => false,
        }
    }

    /// Requested keys that have no value, deduplicated, in request order.
    ///
    /// Keys explicitly set to null are considered available.
    pub fn ensure_keys<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = Vec::new();
        let mut missing = Vec::new();
        for key in keys {
            let name = key.as_ref().trim();
            let canonical = canonical_key(name);
            if seen.contains(&canonical) {
                continue;
            }
            if self.get(name).is_none() {
                missing.push(name.to_string());
            }
            seen.push(canonical);
        }
        missing
    }

    /// Settings in order of first definition.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Root config file the store was resolved from.
    pub fn config_file(&self) -> Option<&NormalizedPath> {
        self.origin.as_ref()
    }

    /// Problems found while reading config files.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// First path named by a `ConfigFile` value.
fn first_path(value: &Value) -> Option<NormalizedPath> {
    value
        .as_slice()
        .iter()
        .find(|item| !item.is_null())
        .map(|item| NormalizedPath::new(item.to_string()))
}
