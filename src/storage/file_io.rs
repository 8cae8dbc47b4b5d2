//! Whole-file reads and atomic replacement writes
//!
//! A reader either sees the previous contents or the new ones, never a
//! half-written file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

fn storage_error(action: &str, path: &Path, err: io::Error) -> LedgerError {
    LedgerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a whole file as text, returning `None` if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, LedgerError> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error("read", path, e)),
    }
}

/// Replace `path` with `contents` via a synced sibling temp file and a rename
///
/// Missing parent directories are created.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    // Same directory, so the rename stays on one filesystem
    let staged = staging_path(path);
    let mut file = File::create(&staged).map_err(|e| storage_error("create", &staged, e))?;
    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|e| storage_error("write", &staged, e))?;
    drop(file);

    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        storage_error("replace", path, e)
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
