//! Ledger entry model
//!
//! An entry is one recorded income or expense. Entries are only ever built
//! from a validated [`NewEntry`]; there is no edit path, corrections are a
//! delete followed by a fresh add.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EntryId;
use super::money::{Won, WonParseError};

/// Date format used on the wire and in form input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Token used in persisted JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Localized label shown in the table and CSV export
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "수입",
            Self::Expense => "지출",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EntryType {
    type Err = EntryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "수입" => Ok(Self::Income),
            "지출" => Ok(Self::Expense),
            other => match other.to_lowercase().as_str() {
                "income" => Ok(Self::Income),
                "expense" => Ok(Self::Expense),
                _ => Err(EntryValidationError::InvalidType(s.to_string())),
            },
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, fixed at creation
    pub id: EntryId,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Income or expense
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Trimmed, non-empty category label
    pub category: String,

    /// Always positive, at most [`Won::MAX_ENTRY`]
    pub amount: Won,

    /// Trimmed free text, may be empty
    #[serde(default)]
    pub memo: String,
}

impl Entry {
    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// Check the invariants every stored entry must hold
    ///
    /// Used when reading persisted data, which may have been edited by hand.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.category.trim().is_empty() {
            return Err(EntryValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount(self.amount.value()));
        }

        if self.amount > Won::MAX_ENTRY {
            return Err(EntryValidationError::AmountTooLarge(self.amount.value()));
        }

        Ok(())
    }
}

/// Raw field values from a form submission
///
/// Nothing here has been checked yet; [`NewEntry::into_entry`] turns it into
/// an [`Entry`] or explains why it can't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub date: String,
    pub entry_type: EntryType,
    pub category: String,
    pub amount: String,
    pub memo: String,
}

impl NewEntry {
    /// Build a candidate; `amount` may be a number or numeric text
    pub fn new(
        date: impl Into<String>,
        entry_type: EntryType,
        category: impl Into<String>,
        amount: impl ToString,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            entry_type,
            category: category.into(),
            amount: amount.to_string(),
            memo: memo.into(),
        }
    }

    /// Default value for the form's date field
    pub fn today() -> String {
        Local::now().date_naive().format(DATE_FORMAT).to_string()
    }

    /// Check the candidate without consuming it
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        self.parse_fields().map(|_| ())
    }

    /// Validate and assign a fresh id
    pub fn into_entry(self) -> Result<Entry, EntryValidationError> {
        let (date, amount) = self.parse_fields()?;

        Ok(Entry {
            id: EntryId::new(),
            date,
            entry_type: self.entry_type,
            category: self.category.trim().to_string(),
            amount,
            memo: self.memo.trim().to_string(),
        })
    }

    fn parse_fields(&self) -> Result<(NaiveDate, Won), EntryValidationError> {
        let date_str = self.date.trim();
        if date_str.is_empty() {
            return Err(EntryValidationError::EmptyDate);
        }

        if self.category.trim().is_empty() {
            return Err(EntryValidationError::EmptyCategory);
        }

        let amount = Won::parse(&self.amount)?;
        if !amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount(amount.value()));
        }
        if amount > Won::MAX_ENTRY {
            return Err(EntryValidationError::AmountTooLarge(amount.value()));
        }

        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .map_err(|_| EntryValidationError::InvalidDate(date_str.to_string()))?;

        Ok((date, amount))
    }
}

/// Reasons an entry candidate is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyDate,
    InvalidDate(String),
    InvalidType(String),
    EmptyCategory,
    InvalidAmount(String),
    NonPositiveAmount(i64),
    AmountTooLarge(i64),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDate => write!(f, "Date is required"),
            Self::InvalidDate(s) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", s),
            Self::InvalidType(s) => write!(f, "Unknown entry type: {}", s),
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::InvalidAmount(msg) => write!(f, "{}", msg),
            Self::NonPositiveAmount(n) => write!(f, "Amount must be greater than zero, got {}", n),
            Self::AmountTooLarge(n) => {
                write!(f, "Amount exceeds {}, got {}", Won::MAX_ENTRY.value(), n)
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}

impl From<WonParseError> for EntryValidationError {
    fn from(err: WonParseError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}

impl From<EntryValidationError> for crate::error::LedgerError {
    fn from(err: EntryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
