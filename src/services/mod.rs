//! Service layer for the household ledger
//!
//! The service layer sits on top of storage and owns validation,
//! persistence-after-mutation and change notification.

pub mod ledger;

pub use ledger::{ChangeListener, LedgerChange, LedgerStore};
