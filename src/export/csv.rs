//! CSV Export functionality
//!
//! Every cell is double-quoted with embedded quotes doubled, rows are joined
//! by `\n`, and amounts are written as plain integers. Entries appear in
//! the order given, which for the ledger is storage order rather than the
//! date-sorted display order.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, DATE_FORMAT};
use crate::storage::write_atomic;

/// Column names of the header row
pub const CSV_HEADER: [&str; 5] = ["날짜", "유형", "카테고리", "금액", "메모"];

/// Ledger name used in export filenames unless configured otherwise
pub const DEFAULT_LEDGER_NAME: &str = "가계부";

/// A finished CSV document ready to hand to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested filename, `<ledger-name>_<YYYY-MM-DD>.csv`
    pub filename: String,
    /// UTF-8 CSV text
    pub content: String,
}

impl CsvExport {
    /// Raw bytes of the document
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// MIME type to use when serving the document
    pub fn mime_type(&self) -> &'static str {
        "text/csv;charset=utf-8"
    }

    /// Write the document into `dir` under its filename, returning the path
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> LedgerResult<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        write_atomic(&path, self.as_bytes())
            .map_err(|e| LedgerError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Filename for an export made on `date`
pub fn export_filename(ledger_name: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", ledger_name, date.format(DATE_FORMAT))
}

/// Render entries as CSV text (header plus one row per entry)
pub fn entries_to_csv(entries: &[Entry]) -> LedgerResult<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for entry in entries {
        let date = entry.date.format(DATE_FORMAT).to_string();
        let amount = entry.amount.to_plain_string();

        writer
            .write_record([
                date.as_str(),
                entry.entry_type.label(),
                entry.category.as_str(),
                amount.as_str(),
                entry.memo.as_str(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    let mut content = String::from_utf8(bytes).map_err(|e| LedgerError::Export(e.to_string()))?;

    // Rows are joined, not terminated
    if content.ends_with('\n') {
        content.pop();
    }

    Ok(content)
}

/// Write the CSV text of `entries` to any writer
pub fn write_entries_csv<W: Write>(entries: &[Entry], writer: &mut W) -> LedgerResult<()> {
    let content = entries_to_csv(entries)?;
    writer
        .write_all(content.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Build the export document, refusing when there is nothing to export
pub fn build_csv_export(
    entries: &[Entry],
    ledger_name: &str,
    date: NaiveDate,
) -> LedgerResult<CsvExport> {
    if entries.is_empty() {
        return Err(LedgerError::NothingToExport);
    }

    Ok(CsvExport {
        filename: export_filename(ledger_name, date),
        content: entries_to_csv(entries)?,
    })
}
