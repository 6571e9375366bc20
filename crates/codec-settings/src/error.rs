//! Error and warning types for codec-settings

use codec_fs::NormalizedPath;

use crate::line::MalformedReason;

/// Result type for codec-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that must reach the caller.
///
/// Only persistence can fail; resolution degrades to warnings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to save settings to {path}: {source}")]
    SaveFailed {
        path: NormalizedPath,
        #[source]
        source: codec_fs::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: NormalizedPath,
        to: NormalizedPath,
        #[source]
        source: codec_fs::Error,
    },

    #[error("Save requested but no config file is known")]
    NoSaveTarget,
}

/// Non-fatal problems found while reading config files.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("{path}:{line}: skipping malformed line ({reason})")]
    MalformedLine {
        path: NormalizedPath,
        line: usize,
        reason: MalformedReason,
    },

    #[error("Circular import of {path} ignored")]
    CircularImport { path: NormalizedPath },

    #[error("Config file {path} could not be read: {reason}")]
    MissingFile { path: NormalizedPath, reason: String },
}

impl Warning {
    /// Log the warning and hand it back for collection.
    pub(crate) fn emit(self) -> Self {
        tracing::warn!("{}", self);
        self
    }
}
