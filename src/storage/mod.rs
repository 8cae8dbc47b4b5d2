//! Storage layer for the household ledger
//!
//! The ledger persists through a plain string key-value contract so any
//! host medium can back it. Two implementations ship here: an in-memory
//! map and a directory of JSON files with atomic writes.

pub mod entries;
pub mod file_io;
pub mod file_store;
pub mod memory;

pub use entries::{decode_entries, encode_entries, read_entries, write_entries, ENTRIES_KEY};
pub use file_io::{read_text, write_atomic};
pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::LedgerError;

/// Synchronous string key-value store
///
/// Implementations are expected to be local and always available; there is
/// no retry or timeout handling above this trait.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        (**self).set(key, value)
    }
}
