//! Filesystem helpers for replacing the contact file atomically.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `contents` to `destination` without ever leaving a half-written file.
///
/// The bytes go to a sibling temp file first, are synced, and then renamed over
/// the destination. Missing parent directories are created.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_sibling(destination);
    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename_with_fallback(&temp_path, destination)
}

/// Rename a file over `destination`.
///
/// Where the platform refuses to rename over an existing file, the existing
/// file is moved aside first and restored if the second rename also fails, so
/// the last good copy is never lost. The temp file is cleaned up on failure.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let initial_err = match fs::rename(temp_path, destination) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    if !destination.exists() {
        let _ = fs::remove_file(temp_path);
        return Err(initial_err);
    }

    let backup = sibling(destination, ".bak");
    if let Err(backup_err) = fs::rename(destination, &backup) {
        let _ = fs::remove_file(temp_path);
        return Err(io::Error::new(
            backup_err.kind(),
            format!(
                "Atomic rename failed (initial: {}, backup: {})",
                initial_err, backup_err
            ),
        ));
    }

    match fs::rename(temp_path, destination) {
        Ok(()) => {
            let _ = fs::remove_file(&backup);
            Ok(())
        }
        Err(retry_err) => {
            let _ = fs::rename(&backup, destination);
            let _ = fs::remove_file(temp_path);
            Err(io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            ))
        }
    }
}

fn temp_sibling(destination: &Path) -> PathBuf {
    sibling(destination, &format!(".{}.tmp", std::process::id()))
}

fn sibling(destination: &Path, suffix: &str) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("contacts"));
    name.push(suffix);
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.json");
        let dest = dir.path().join("ab.json");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&temp).unwrap().write_all(b"new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_failed_replace_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.tmp");
        let dest = dir.path().join("ab.json");
        File::create(&dest).unwrap().write_all(b"good").unwrap();

        assert!(rename_with_fallback(&missing, &dest).is_err());

        assert_eq!(fs::read_to_string(&dest).unwrap(), "good");
        assert!(!dir.path().join("ab.json.bak").exists());
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("nested").join("ab.json");

        write_atomic(&dest, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "{}");
        let leftovers: Vec<_> = fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("ab.json");

        write_atomic(&dest, b"first").unwrap();
        write_atomic(&dest, b"second").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");
    }
}
