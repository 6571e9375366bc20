use codec_fs::{NormalizedPath, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("settings.cfg"));

    io::write_atomic(&path, b"Verbosity = DEBUG\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "Verbosity = DEBUG\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("settings.cfg");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("a").join("b").join("settings.cfg"));

    io::write_text(&path, "deep content").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "deep content");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("settings.cfg"));

    io::write_text(&path, "content").unwrap();
    io::write_text(&path, "content again").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {leftovers:?}");
}

#[test]
fn test_read_text_nonexistent_file_is_not_found() {
    let path = NormalizedPath::new("/nonexistent/settings.cfg");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_copy_atomic_copies_bytes() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("from.cfg");
    fs::write(&from, "# comment\nKey = value\n").unwrap();

    let to = NormalizedPath::new(temp.path().join("copy").join("to.cfg"));
    io::copy_atomic(&NormalizedPath::new(&from), &to).unwrap();

    assert_eq!(io::read_text(&to).unwrap(), "# comment\nKey = value\n");
}

#[test]
fn test_copy_atomic_missing_source_fails_without_creating_target() {
    let temp = TempDir::new().unwrap();
    let to = NormalizedPath::new(temp.path().join("to.cfg"));

    let result = io::copy_atomic(&NormalizedPath::new(temp.path().join("missing.cfg")), &to);

    assert!(result.is_err());
    assert!(!to.exists());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn write_atomic_to_readonly_directory_keeps_original() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("readonly");
        fs::create_dir(&dir).unwrap();
        let file_path = dir.join("settings.cfg");
        fs::write(&file_path, "original").unwrap();
        fs::set_permissions(&dir, Permissions::from_mode(0o555)).unwrap();

        let result = io::write_text(&NormalizedPath::new(&file_path), "replacement");
        let content = fs::read_to_string(&file_path).unwrap();

        let _ = fs::set_permissions(&dir, Permissions::from_mode(0o755));

        assert!(result.is_err(), "write into read-only directory should fail");
        assert_eq!(content, "original");
    }
}
