//! Entry display formatting
//!
//! Renders the date-sorted entry table and the totals line for terminal
//! or plain-text front ends.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format_won;
use crate::error::LedgerError;
use crate::models::{Entry, DATE_FORMAT};
use crate::reports::LedgerSummary;

/// Shown in place of the table when there are no entries
pub const EMPTY_LEDGER_MESSAGE: &str = "기록된 내역이 없습니다.";

/// Shown when export is requested on an empty ledger
pub const NOTHING_TO_EXPORT_MESSAGE: &str = "내보낼 데이터가 없습니다.";

const EMPTY_MEMO: &str = "-";

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "날짜")]
    date: String,
    #[tabled(rename = "유형")]
    entry_type: &'static str,
    #[tabled(rename = "카테고리")]
    category: String,
    #[tabled(rename = "금액")]
    amount: String,
    #[tabled(rename = "메모")]
    memo: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl EntryRow {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            date: entry.date.format(DATE_FORMAT).to_string(),
            entry_type: entry.entry_type.label(),
            category: entry.category.clone(),
            amount: format_won(entry.amount),
            memo: memo_or_placeholder(&entry.memo).to_string(),
            id: entry.id.short(),
        }
    }
}

fn memo_or_placeholder(memo: &str) -> &str {
    if memo.is_empty() {
        EMPTY_MEMO
    } else {
        memo
    }
}

/// Format a single entry as one line
pub fn format_entry_row(entry: &Entry) -> String {
    format!(
        "{} {} {:12} {:>14} {}",
        entry.date.format(DATE_FORMAT),
        entry.entry_type.label(),
        entry.category,
        format_won(entry.amount),
        memo_or_placeholder(&entry.memo)
    )
}

/// Format entries as a table, in the order given
///
/// Pass [`LedgerStore::sorted_view`](crate::services::LedgerStore::sorted_view)
/// for the usual most-recent-first listing.
pub fn format_ledger_table<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let rows: Vec<EntryRow> = entries.into_iter().map(EntryRow::from_entry).collect();
    if rows.is_empty() {
        return EMPTY_LEDGER_MESSAGE.to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format the totals line
pub fn format_summary(summary: &LedgerSummary) -> String {
    format!(
        "수입 {}  지출 {}  잔액 {}",
        format_won(summary.income_total),
        format_won(summary.expense_total),
        format_won(summary.balance)
    )
}

/// User-facing text for an error
///
/// Conditions the user causes get a localized message; everything else
/// falls back to the error's own description.
pub fn format_error(err: &LedgerError) -> String {
    match err {
        LedgerError::NothingToExport => NOTHING_TO_EXPORT_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
