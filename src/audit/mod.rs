//! Audit logging for the household ledger
//!
//! Records every add, remove and clear in an append-only, line-delimited
//! JSON log. The log is write-only from the ledger's point of view; it is
//! never read back to rebuild state.
//!
//! # Example
//!
//! ```rust,ignore
//! use household_ledger::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&entry))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
