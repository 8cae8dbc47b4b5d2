//! Reports module for the household ledger
//!
//! Provides the income/expense/balance summary shown under the entry table.

pub mod summary;

pub use summary::LedgerSummary;
