//! Entry list persistence
//!
//! The whole ledger lives under a single key as a JSON array of entries.
//! Reading is strict ([`decode_entries`]) with a soft wrapper
//! ([`read_entries`]) that falls back to an empty ledger on any problem.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Entry;

use super::KeyValueStore;

/// Key the ledger is stored under
pub const ENTRIES_KEY: &str = "household-ledger-entries";

/// Parse a persisted value into entries
///
/// Fails on malformed JSON, a non-array payload, records missing required
/// fields, records breaking entry invariants, and duplicate ids.
pub fn decode_entries(raw: &str) -> LedgerResult<Vec<Entry>> {
    let entries: Vec<Entry> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| LedgerError::Validation(format!("entry {}: {}", entry.id, e)))?;

        if !seen.insert(entry.id) {
            return Err(LedgerError::Validation(format!(
                "duplicate entry id {}",
                entry.id
            )));
        }
    }

    Ok(entries)
}

/// Serialize entries to the persisted JSON array
pub fn encode_entries(entries: &[Entry]) -> LedgerResult<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Load entries stored under `key`, never failing
///
/// A missing key, an unreadable store or an unparseable value all yield an
/// empty ledger.
pub fn read_entries<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<Entry> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored entries, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored entries, starting empty");
            return Vec::new();
        }
    };

    match decode_entries(&raw) {
        Ok(entries) => {
            debug!(key, count = entries.len(), "loaded entries");
            entries
        }
        Err(e) => {
            warn!(key, error = %e, "stored entries are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Persist entries under `key`
pub fn write_entries<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    entries: &[Entry],
) -> LedgerResult<()> {
    let raw = encode_entries(entries)?;
    store.set(key, &raw)
}
