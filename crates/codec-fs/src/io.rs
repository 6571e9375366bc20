//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Temp file that is removed on drop unless it was renamed into place.
struct TempFile {
    path: PathBuf,
    committed: bool,
}

impl TempFile {
    fn create(target: &Path) -> Result<(Self, File)> {
        let file_name = target.file_name().ok_or_else(|| Error::NoFileName {
            path: target.to_path_buf(),
        })?;
        // Same directory as the target so the rename never crosses filesystems
        let temp_name = format!(
            ".{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id()
        );
        let path = target.with_file_name(temp_name);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        Ok((
            Self {
                path,
                committed: false,
            },
            file,
        ))
    }

    fn commit(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(|e| Error::io(target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::debug!("Could not remove temp file {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes. The
/// target is either left untouched or fully replaced; a failed write never
/// leaves a truncated file or a stray temp file behind.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let (temp, mut temp_file) = TempFile::create(&native_path)?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp.path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp.path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    temp.commit(&native_path)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path);

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy a file by reading it fully and writing the copy atomically.
pub fn copy_atomic(from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
    let native_from = from.to_native();
    let content = fs::read(&native_from).map_err(|e| Error::io(&native_from, e))?;
    write_atomic(to, &content)
}
