//! Directory-backed key-value store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go through
//! [`write_atomic`](super::file_io::write_atomic) so a crash mid-save leaves
//! the previous value intact.

use std::path::{Path, PathBuf};

use crate::error::LedgerError;

use super::file_io::{read_text, write_atomic};
use super::KeyValueStore;

/// File-per-key [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    ///
    /// Keys are restricted to a filename-safe alphabet; anything else is
    /// replaced with `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::Storage("Key cannot be empty".into()));
        }
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::Storage("Key cannot be empty".into()));
        }
        write_atomic(self.path_for(key), value.as_bytes())
    }
}
