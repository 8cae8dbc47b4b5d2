//! Ledger summary
//!
//! Aggregates income, expense and the resulting balance over a set of entries.

use serde::{Deserialize, Serialize};

use crate::models::{Entry, EntryType, Won};

/// Income, expense and balance totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of income amounts
    pub income_total: Won,
    /// Sum of expense amounts
    pub expense_total: Won,
    /// `income_total - expense_total`, may be negative
    pub balance: Won,
}

impl LedgerSummary {
    /// Compute totals over `entries`; an empty input gives all zeros
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut income_total = Won::zero();
        let mut expense_total = Won::zero();

        for entry in entries {
            match entry.entry_type {
                EntryType::Income => income_total += entry.amount,
                EntryType::Expense => expense_total += entry.amount,
            }
        }

        Self {
            income_total,
            expense_total,
            balance: income_total - expense_total,
        }
    }

    /// Check if spending exceeds income
    pub fn is_overspent(&self) -> bool {
        self.balance.is_negative()
    }
}
