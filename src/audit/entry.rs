//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// An entry was added
    Create,
    /// An entry was removed
    Delete,
    /// The whole ledger was emptied
    Clear,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Clear => write!(f, "CLEAR"),
        }
    }
}

/// A single audit log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected entry; absent for clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,

    /// Entry state before the operation (delete)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entry state after the operation (create)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Number of entries affected
    pub count: usize,
}

impl AuditEntry {
    pub fn create(entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entry_id: Some(entry.id.to_string()),
            before: None,
            after: serde_json::to_value(entry).ok(),
            count: 1,
        }
    }

    pub fn delete(entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entry_id: Some(entry.id.to_string()),
            before: serde_json::to_value(entry).ok(),
            after: None,
            count: 1,
        }
    }

    /// Clear keeps the removed entries as a JSON array in `before`
    pub fn clear(removed: &[Entry]) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Clear,
            entry_id: None,
            before: serde_json::to_value(removed).ok(),
            after: None,
            count: removed.len(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        match &self.entry_id {
            Some(id) => output.push_str(&format!(" entry {}", id)),
            None => output.push_str(&format!(" {} entries", self.count)),
        }

        output
    }
}
