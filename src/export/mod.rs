//! Export module for the household ledger
//!
//! Produces the spreadsheet-compatible CSV document of all entries, along
//! with the dated filename a UI uses when offering it for download.

pub mod csv;

pub use self::csv::{
    build_csv_export, entries_to_csv, export_filename, write_entries_csv, CsvExport, CSV_HEADER,
    DEFAULT_LEDGER_NAME,
};
