//! [`ConfigTree`] fixture for config file scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use codec_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary directory of config files.
///
/// # Example
///
/// ```rust,no_run
/// use codec_test_utils::ConfigTree;
///
/// let tree = ConfigTree::new()
///     .file(".codecfile", "configfile = team.cfg\nVerbosity = DEBUG\n")
///     .file("team.cfg", "LogType = TXT\n");
/// tree.assert_file_contains(".codecfile", "Verbosity = DEBUG");
/// ```
pub struct ConfigTree {
    temp_dir: TempDir,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn file(self, name: &str, content: &str) -> Self {
        self.write(name, content);
        self
    }

    /// Write `content` to `name` in place, e.g. between two loads.
    pub fn write(&self, name: &str, content: &str) {
        let full_path = self.root().join(name);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn native(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Path of `name` inside the tree.
    pub fn path(&self, name: &str) -> NormalizedPath {
        NormalizedPath::new(self.native(name))
    }

    /// Content of `name`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        let full_path = self.native(name);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.native(name).exists()
    }

    /// Assert that the file at `name` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "File {name} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }

    /// Assert that the file at `name` does not contain `content`.
    pub fn assert_file_lacks(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            !file_content.contains(content),
            "File {name} unexpectedly contains {content}.\nActual: {file_content}"
        );
    }
}
