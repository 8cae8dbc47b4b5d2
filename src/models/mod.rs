//! Core data models for the household ledger
//!
//! This module contains the data structures of the ledger domain: entries,
//! their identifiers, and the won amount type.

pub mod entry;
pub mod ids;
pub mod money;

pub use entry::{Entry, EntryType, EntryValidationError, NewEntry, DATE_FORMAT};
pub use ids::EntryId;
pub use money::{Won, WonParseError};
