//! Household Ledger - local-first income and expense tracking
//!
//! This library is the core of a small household account book: a form
//! records income and expense entries, the entries persist through a
//! key-value store, render newest-first, roll up into income, expense and
//! balance totals, and export to CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings management
//! - `error`: Custom error types
//! - `models`: Entries, ids and the won amount type
//! - `storage`: Key-value store contract with memory and file backends
//! - `services`: `LedgerStore`, the single owner of ledger state
//! - `reports`: Income/expense/balance summary
//! - `export`: CSV export
//! - `display`: Currency and table formatting for front ends
//! - `audit`: Audit logging system
//!
//! # Example
//!
//! ```rust,ignore
//! use household_ledger::config::{LedgerPaths, Settings};
//! use household_ledger::models::{EntryType, NewEntry};
//! use household_ledger::services::LedgerStore;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut ledger = LedgerStore::open_default(&paths, &settings)?;
//!
//! ledger.subscribe(|change| println!("ledger changed: {:?}", change));
//! ledger.add(NewEntry::new(NewEntry::today(), EntryType::Expense, "식비", "12000", "점심"))?;
//! println!("{}", household_ledger::display::format_ledger_table(ledger.sorted_view()));
//! ```

pub mod audit;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use models::{Entry, EntryId, EntryType, NewEntry, Won};
pub use services::{LedgerChange, LedgerStore};
