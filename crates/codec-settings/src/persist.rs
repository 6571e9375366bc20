//! Writing resolved settings back to a config file
//!
//! A save touches only the lines that have to change. Every in-store key is
//! classified against the target file:
//!
//! - **unchanged**: the target (with its imports) already yields the value
//! - **delete**: the value is the built-in default, so any line for it goes
//! - **write**: anything else; old lines are removed and one line appended
//!
//! Keys with lines in the target that the store no longer knows are deleted
//! too. If deleting a default-valued key would let an imported file's value
//! show through, an explicit override line is written instead of editing the
//! imported file.
//!
//! The new content is built in memory and written with a single atomic
//! replace.

use std::collections::{HashMap, HashSet};

use codec_fs::{NormalizedPath, io};
use similar::TextDiff;

use crate::error::{Error, Result, Warning};
use crate::import::{self, IMPORT_KEY};
use crate::line::parse_line;
use crate::setting::Setting;
use crate::store::{SAVE_KEY, Settings};
use crate::value::{self, Value};

/// Keys that steer resolution and are never persisted by a save.
const RESERVED_KEYS: &[&str] = &[IMPORT_KEY, SAVE_KEY];

/// Computed changes for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub target: NormalizedPath,
    /// Target content before the save.
    pub before: String,
    /// Target content after the save.
    pub after: String,
    /// Display names of keys appended, in store order.
    pub written: Vec<String>,
    /// Keys whose lines were removed, in file order.
    pub deleted: Vec<String>,
    /// Keys written only to mask a value from an imported file.
    pub overridden: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl SavePlan {
    /// Work out what saving `settings` to `target` would change.
    ///
    /// Nothing is written.
    pub fn compute(settings: &Settings, target: &NormalizedPath) -> Self {
        let mut warnings = Vec::new();
        let before = match io::read_text(target) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} does not exist yet, starting empty", target);
                String::new()
            }
            Err(e) => {
                warnings.push(
                    Warning::MissingFile {
                        path: target.clone(),
                        reason: e.to_string(),
                    }
                    .emit(),
                );
                String::new()
            }
        };

        let lines: Vec<&str> = before.split_inclusive('\n').collect();
        let line_keys: Vec<Option<String>> = lines
            .iter()
            .map(|line| parse_line(line).key().filter(|k| !is_reserved(k)))
            .collect();

        // What a fresh load of the target yields, overall and from imports only
        let resolution = import::resolve_file(target);
        let mut on_disk: HashMap<String, Value> = HashMap::new();
        let mut imported: HashMap<String, Value> = HashMap::new();
        for entry in resolution.entries {
            let nested = entry.is_imported();
            let Some(value) = entry.value else { continue };
            let key = entry.key.to_lowercase();
            if nested {
                imported.insert(key.clone(), value.clone());
            }
            on_disk.insert(key, value);
        }
        warnings.extend(resolution.warnings);

        let mut to_write: Vec<&Setting> = Vec::new();
        let mut to_delete: HashSet<String> = HashSet::new();
        let mut defaulted: Vec<&Setting> = Vec::new();

        for setting in settings.iter() {
            let Some(value) = setting.value.as_ref() else { continue };
            if is_reserved(&setting.key) || on_disk.get(&setting.key) == Some(value) {
                continue;
            }
            to_delete.insert(setting.key.clone());
            if settings.default_of(&setting.key) == Some(value) {
                defaulted.push(setting);
            } else {
                to_write.push(setting);
            }
        }

        for key in line_keys.iter().flatten() {
            if !settings.contains(key) {
                to_delete.insert(key.clone());
            }
        }

        let mut overridden = Vec::new();
        for setting in defaulted {
            let masked = matches!(
                (imported.get(&setting.key), setting.value.as_ref()),
                (Some(nested), Some(value)) if nested != value
            );
            if masked {
                overridden.push(setting.name.clone());
                to_write.push(setting);
            }
        }
        // Overrides join in store order
        to_write.sort_by_key(|s| settings.iter().position(|other| other.key == s.key));

        let mut after = String::with_capacity(before.len());
        let mut deleted = Vec::new();
        for (line, key) in lines.iter().zip(&line_keys) {
            match key {
                Some(key) if to_delete.contains(key) => {
                    if !deleted.contains(key) {
                        deleted.push(key.clone());
                    }
                }
                _ => after.push_str(line),
            }
        }

        if !to_write.is_empty() && !after.is_empty() && !after.ends_with('\n') {
            after.push('\n');
        }
        for setting in &to_write {
            after.push_str(&render_setting(setting, target));
        }

        Self {
            target: target.clone(),
            before,
            after,
            written: to_write.iter().map(|s| s.name.clone()).collect(),
            deleted,
            overridden,
            warnings,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.before != self.after
    }

    /// Unified diff of the target before and after the save.
    pub fn diff(&self) -> String {
        let name = self.target.as_str();
        TextDiff::from_lines(&self.before, &self.after)
            .unified_diff()
            .context_radius(3)
            .header(name, name)
            .to_string()
    }

    /// Write the new content. Does nothing when the content is unchanged.
    pub fn apply(&self) -> Result<()> {
        if !self.has_changes() {
            tracing::debug!("{} already up to date", self.target);
            return Ok(());
        }

        io::write_text(&self.target, &self.after).map_err(|source| Error::SaveFailed {
            path: self.target.clone(),
            source,
        })?;

        tracing::info!(
            "Saved settings to {} ({} written, {} removed)",
            self.target,
            self.written.len(),
            self.deleted.len()
        );
        Ok(())
    }
}

/// Save `settings` to `target`, returning the applied plan.
pub fn save(settings: &Settings, target: &NormalizedPath) -> Result<SavePlan> {
    let plan = SavePlan::compute(settings, target);
    plan.apply()?;
    Ok(plan)
}

impl Settings {
    /// Save to `target`. See [`save`].
    pub fn save(&self, target: &NormalizedPath) -> Result<SavePlan> {
        save(self, target)
    }

    /// Where the `Save` setting asks to save, if anywhere.
    ///
    /// `true` means the root config file; a path names another file.
    pub fn save_target(&self) -> Result<Option<NormalizedPath>> {
        match self.get(SAVE_KEY) {
            None | Some(Value::Null) | Some(Value::Boolean(false)) => Ok(None),
            Some(Value::Boolean(true)) => self
                .config_file()
                .cloned()
                .map(Some)
                .ok_or(Error::NoSaveTarget),
            Some(other) => match other.as_slice().first() {
                Some(first) => Ok(Some(NormalizedPath::new(first.to_string()))),
                None => Ok(None),
            },
        }
    }

    /// Honour the `Save` setting.
    ///
    /// Saving to a file other than the root config file first copies the
    /// root config file there, so its comments and imports carry over.
    pub fn save_requested(&self) -> Result<Option<SavePlan>> {
        let Some(target) = self.save_target()? else {
            return Ok(None);
        };

        if let Some(origin) = self.config_file() {
            if origin.canonical() != target.canonical() && origin.is_file() {
                io::copy_atomic(origin, &target).map_err(|source| Error::CopyFailed {
                    from: origin.clone(),
                    to: target.clone(),
                    source,
                })?;
            }
        }

        self.save(&target).map(Some)
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Render a setting as config lines.
///
/// Comments attached to the setting are carried along when they came from a
/// different file, since they are not already present in the target.
fn render_setting(setting: &Setting, target: &NormalizedPath) -> String {
    let mut out = String::new();
    let foreign = setting.source_file().is_some_and(|source| source != target);

    if foreign {
        for comment in &setting.leading_comments {
            out.push_str(comment);
            out.push('\n');
        }
    }

    let value = setting.value.as_ref().map(Value::render).unwrap_or_default();
    out.push_str(&format!("{} = {}", value::escape(&setting.name), value));

    if foreign {
        if let Some(comment) = setting.trailing_comment.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!("  # {comment}"));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::Tier;

    #[test]
    fn test_render_setting_plain() {
        let setting = Setting::new(
            "TargetDirectories",
            Some(Value::coerce("/a,/b")),
            Tier::Cli,
        );
        assert_eq!(
            render_setting(&setting, &NormalizedPath::new("/x/.codecfile")),
            "TargetDirectories = /a,/b\n"
        );
    }

    #[test]
    fn test_render_setting_carries_foreign_comments() {
        let setting = Setting::new("Verbosity", Some(Value::from("DEBUG")), Tier::File)
            .with_provenance(vec![NormalizedPath::new("/x/team.cfg")])
            .with_comments(vec!["# team wide".into()], Some("noisy".into()));

        assert_eq!(
            render_setting(&setting, &NormalizedPath::new("/x/.codecfile")),
            "# team wide\nVerbosity = DEBUG  # noisy\n"
        );
    }

    #[test]
    fn test_render_setting_skips_local_comments() {
        let target = NormalizedPath::new("/x/.codecfile");
        let setting = Setting::new("Verbosity", Some(Value::from("DEBUG")), Tier::File)
            .with_provenance(vec![target.clone()])
            .with_comments(vec!["# local".into()], Some("here".into()));

        assert_eq!(render_setting(&setting, &target), "Verbosity = DEBUG\n");
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("configfile"));
        assert!(is_reserved("save"));
        assert!(!is_reserved("verbosity"));
        assert!(!is_reserved("comment"));
    }

    #[test]
    fn test_render_setting_escapes_key() {
        let setting = Setting::new("odd=key#1", Some(Value::Integer(2)), Tier::Cli);
        assert_eq!(
            render_setting(&setting, &NormalizedPath::new("/x/.codecfile")),
            "Odd\\=key\\#1 = 2\n"
        );
    }
}
