//! Display formatting for the ledger
//!
//! Money shown to the user is formatted in Korean won with no fractional
//! digits; CSV export uses plain integers instead (see [`crate::export`]).

pub mod entry;

pub use entry::{
    format_entry_row, format_error, format_ledger_table, format_summary, EMPTY_LEDGER_MESSAGE,
    NOTHING_TO_EXPORT_MESSAGE,
};

use crate::models::Won;

/// Format an amount for display, e.g. `₩1,234,567` or `-₩400`
pub fn format_won(amount: Won) -> String {
    amount.to_string()
}
