//! Ledger service
//!
//! [`LedgerStore`] owns the in-memory entry list and is the only way to
//! change it. Every mutation is validated here, written through to the
//! key-value store before it becomes visible, and then announced to
//! subscribed listeners so the UI can re-render.

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::export::{build_csv_export, CsvExport, DEFAULT_LEDGER_NAME};
use crate::models::{Entry, EntryId, NewEntry};
use crate::reports::LedgerSummary;
use crate::storage::{read_entries, write_entries, FileStore, KeyValueStore, ENTRIES_KEY};

/// What a successful mutation did to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    /// A new entry was appended
    Added(Entry),
    /// A remove was processed; `entry` is `None` when the id matched nothing
    Removed { id: EntryId, entry: Option<Entry> },
    /// The ledger was emptied
    Cleared { removed: usize },
}

/// Callback invoked after every mutation
pub type ChangeListener = Box<dyn FnMut(&LedgerChange)>;

/// The household ledger: entries, persistence and change notification
pub struct LedgerStore<S: KeyValueStore> {
    store: S,
    entries: Vec<Entry>,
    ledger_name: String,
    audit: Option<AuditLogger>,
    listeners: Vec<ChangeListener>,
}

impl LedgerStore<FileStore> {
    /// Open the ledger kept under `paths`, configured by `settings`
    pub fn open_default(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let mut ledger = Self::open(FileStore::new(paths.data_dir()))
            .with_ledger_name(settings.ledger_name.clone());

        if settings.audit_enabled {
            ledger = ledger.with_audit(AuditLogger::new(paths.audit_log()));
        }

        Ok(ledger)
    }
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Create a ledger over `store` and load whatever it holds
    pub fn open(store: S) -> Self {
        let mut ledger = Self {
            store,
            entries: Vec::new(),
            ledger_name: DEFAULT_LEDGER_NAME.to_string(),
            audit: None,
            listeners: Vec::new(),
        };
        ledger.load();
        ledger
    }

    /// Record mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Use `name` as the export filename prefix
    pub fn with_ledger_name(mut self, name: impl Into<String>) -> Self {
        self.ledger_name = name.into();
        self
    }

    /// Register a callback for collection changes
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&LedgerChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the in-memory entries with the persisted ones
    ///
    /// Missing or malformed data yields an empty ledger; this never fails.
    pub fn load(&mut self) -> &[Entry] {
        self.entries = read_entries(&self.store, ENTRIES_KEY);
        &self.entries
    }

    /// Write the in-memory entries to the store
    pub fn save(&self) -> LedgerResult<()> {
        write_entries(&self.store, ENTRIES_KEY, &self.entries)
    }

    /// Validate and append a new entry
    ///
    /// Returns `Ok(None)` when the candidate is rejected; nothing is stored
    /// or announced in that case. Use [`NewEntry::validate`] to find out why.
    pub fn add(&mut self, candidate: NewEntry) -> LedgerResult<Option<Entry>> {
        let entry = match candidate.into_entry() {
            Ok(entry) => entry,
            Err(reason) => {
                debug!(%reason, "entry candidate rejected");
                return Ok(None);
            }
        };

        self.entries.push(entry.clone());
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }

        debug!(id = %entry.id, "entry added");
        self.record(|| AuditEntry::create(&entry));
        self.notify(&LedgerChange::Added(entry.clone()));
        Ok(Some(entry))
    }

    /// Remove the entry with `id`, if any
    ///
    /// A missing id is not an error: the ledger is saved unchanged and the
    /// change is still announced.
    pub fn remove(&mut self, id: EntryId) -> LedgerResult<Option<Entry>> {
        let position = self.entries.iter().position(|e| e.id == id);
        let removed = position.map(|i| self.entries.remove(i));

        if let Err(e) = self.save() {
            if let (Some(i), Some(entry)) = (position, removed) {
                self.entries.insert(i, entry);
            }
            return Err(e);
        }

        match &removed {
            Some(entry) => {
                debug!(%id, "entry removed");
                self.record(|| AuditEntry::delete(entry));
            }
            None => debug!(%id, "remove ignored, no such entry"),
        }

        self.notify(&LedgerChange::Removed {
            id,
            entry: removed.clone(),
        });
        Ok(removed)
    }

    /// Remove by textual id as delivered by UI events
    ///
    /// Text that isn't a valid id can't match anything and is treated like a
    /// missing id.
    pub fn remove_str(&mut self, id: &str) -> LedgerResult<Option<Entry>> {
        match EntryId::parse(id) {
            Ok(id) => self.remove(id),
            Err(_) => {
                debug!(id, "remove ignored, malformed id");
                self.save()?;
                Ok(None)
            }
        }
    }

    /// Remove every entry, returning how many were dropped
    ///
    /// Asking the user for confirmation is the caller's job.
    pub fn clear(&mut self) -> LedgerResult<usize> {
        let previous = std::mem::take(&mut self.entries);

        if let Err(e) = self.save() {
            self.entries = previous;
            return Err(e);
        }

        let removed = previous.len();
        debug!(removed, "ledger cleared");
        self.record(|| AuditEntry::clear(&previous));
        self.notify(&LedgerChange::Cleared { removed });
        Ok(removed)
    }

    /// Income, expense and balance over all entries
    pub fn aggregate(&self) -> LedgerSummary {
        LedgerSummary::from_entries(&self.entries)
    }

    /// Entries ordered by date, most recent first
    ///
    /// Entries sharing a date keep their storage order.
    pub fn sorted_view(&self) -> Vec<&Entry> {
        let mut view: Vec<&Entry> = self.entries.iter().collect();
        view.sort_by(|a, b| b.date.cmp(&a.date));
        view
    }

    /// Export all entries as CSV, named with today's local date
    pub fn export_csv(&self) -> LedgerResult<CsvExport> {
        self.export_csv_on(Local::now().date_naive())
    }

    /// Export all entries as CSV, named with `date`
    ///
    /// Fails with [`LedgerError::NothingToExport`](crate::error::LedgerError::NothingToExport)
    /// on an empty ledger.
    pub fn export_csv_on(&self, date: NaiveDate) -> LedgerResult<CsvExport> {
        build_csv_export(&self.entries, &self.ledger_name, date)
    }

    /// Entries in storage order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ledger_name(&self) -> &str {
        &self.ledger_name
    }

    /// The backing key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn record(&self, build: impl FnOnce() -> AuditEntry) {
        if let Some(logger) = &self.audit {
            // The change is already persisted; a lost audit line must not undo it
            if let Err(e) = logger.log(&build()) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    fn notify(&mut self, change: &LedgerChange) {
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::error::LedgerError;
    use crate::models::{EntryType, Won};
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn new_ledger() -> LedgerStore<MemoryStore> {
        LedgerStore::open(MemoryStore::new())
    }

    fn candidate(date: &str, entry_type: EntryType, amount: i64) -> NewEntry {
        NewEntry::new(date, entry_type, "생활", amount, "")
    }

    /// Store whose writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> LedgerResult<Option<String>> {
            Err(LedgerError::Storage("unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> LedgerResult<()> {
            Err(LedgerError::Storage("unavailable".into()))
        }
    }

    #[test]
    fn test_open_empty() {
        let ledger = new_ledger();
        assert!(ledger.is_empty());
        assert_eq!(ledger.aggregate(), LedgerSummary::default());
    }

    #[test]
    fn test_add_valid() {
        let mut ledger = new_ledger();
        let entry = ledger
            .add(NewEntry::new("2024-05-05", EntryType::Expense, " 선물 ", "35000", " 어린이날 "))
            .unwrap()
            .unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(entry.category, "선물");
        assert_eq!(entry.memo, "어린이날");
        assert_eq!(entry.amount, Won::new(35000));
        assert_eq!(ledger.get(entry.id), Some(&entry));
    }

    #[test]
    fn test_add_persists_immediately() {
        let mut ledger = new_ledger();
        ledger.add(candidate("2024-05-05", EntryType::Income, 100)).unwrap();

        let raw = ledger.store().get(ENTRIES_KEY).unwrap().unwrap();
        assert_eq!(crate::storage::decode_entries(&raw).unwrap(), ledger.entries());
    }

    #[test]
    fn test_add_invalid_is_noop() {
        let mut ledger = new_ledger();
        let changes = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&changes);
        ledger.subscribe(move |_| *counter.borrow_mut() += 1);

        for bad in [
            NewEntry::new("", EntryType::Expense, "식비", "1000", ""),
            NewEntry::new("2024-01-01", EntryType::Expense, "  ", "1000", ""),
            NewEntry::new("2024-01-01", EntryType::Expense, "식비", "0", ""),
            NewEntry::new("2024-01-01", EntryType::Expense, "식비", "-1", ""),
        ] {
            assert_eq!(ledger.add(bad).unwrap(), None);
        }

        assert!(ledger.is_empty());
        assert_eq!(*changes.borrow(), 0);
        assert_eq!(ledger.store().get(ENTRIES_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let mut ledger = new_ledger();
        let keep = ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap().unwrap();
        let gone = ledger.add(candidate("2024-01-02", EntryType::Income, 2)).unwrap().unwrap();

        let removed = ledger.remove(gone.id).unwrap();
        assert_eq!(removed, Some(gone.clone()));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(gone.id).is_none());
        assert!(ledger.get(keep.id).is_some());
    }

    #[test]
    fn test_remove_missing_leaves_ledger_unchanged() {
        let mut ledger = new_ledger();
        ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap();
        let before = ledger.store().get(ENTRIES_KEY).unwrap();

        assert_eq!(ledger.remove(EntryId::new()).unwrap(), None);
        assert_eq!(ledger.remove_str("not-an-id").unwrap(), None);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.store().get(ENTRIES_KEY).unwrap(), before);
    }

    #[test]
    fn test_remove_str() {
        let mut ledger = new_ledger();
        let entry = ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap().unwrap();

        assert!(ledger.remove_str(&entry.id.to_string()).unwrap().is_some());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut ledger = new_ledger();
        assert_eq!(ledger.clear().unwrap(), 0);

        for day in 1..=3 {
            ledger
                .add(candidate(&format!("2024-01-0{}", day), EntryType::Expense, 10))
                .unwrap();
        }

        assert_eq!(ledger.clear().unwrap(), 3);
        assert!(ledger.is_empty());
        assert_eq!(ledger.store().get(ENTRIES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_aggregate() {
        let mut ledger = new_ledger();
        ledger.add(candidate("2024-01-01", EntryType::Income, 1000)).unwrap();
        ledger.add(candidate("2024-01-02", EntryType::Expense, 400)).unwrap();
        ledger.add(candidate("2024-01-03", EntryType::Income, 200)).unwrap();

        let summary = ledger.aggregate();
        assert_eq!(summary.income_total, Won::new(1200));
        assert_eq!(summary.expense_total, Won::new(400));
        assert_eq!(summary.balance, Won::new(800));
    }

    #[test]
    fn test_aggregate_largest_amounts() {
        let largest = Won::MAX_ENTRY.value();
        let mut ledger = new_ledger();
        ledger.add(candidate("2024-01-01", EntryType::Expense, largest)).unwrap();
        ledger.add(candidate("2024-01-02", EntryType::Expense, largest)).unwrap();
        assert_eq!(ledger.len(), 2);

        let summary = ledger.aggregate();
        assert_eq!(summary.expense_total.value(), largest * 2);
        assert_eq!(summary.balance.value(), -largest * 2);
    }

    #[test]
    fn test_add_oversized_amount_is_noop() {
        let mut ledger = new_ledger();
        let added = ledger
            .add(candidate("2024-01-01", EntryType::Income, i64::MAX))
            .unwrap();
        assert!(added.is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_sorted_view() {
        let mut ledger = new_ledger();
        for date in ["2024-01-01", "2024-03-15", "2024-02-01"] {
            ledger.add(candidate(date, EntryType::Expense, 1)).unwrap();
        }

        let dates: Vec<String> = ledger
            .sorted_view()
            .iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-03-15", "2024-02-01", "2024-01-01"]);

        // Storage order is untouched
        assert_eq!(ledger.entries()[0].date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_sorted_view_is_stable() {
        let mut ledger = new_ledger();
        let first = ledger.add(candidate("2024-01-01", EntryType::Expense, 1)).unwrap().unwrap();
        let second = ledger.add(candidate("2024-01-01", EntryType::Expense, 2)).unwrap().unwrap();

        let view = ledger.sorted_view();
        assert_eq!(view[0].id, first.id);
        assert_eq!(view[1].id, second.id);
    }

    #[test]
    fn test_export() {
        let mut ledger = new_ledger().with_ledger_name("household");
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        assert!(ledger.export_csv_on(date).unwrap_err().is_nothing_to_export());

        ledger.add(candidate("2024-01-01", EntryType::Expense, 1)).unwrap();
        ledger.add(candidate("2024-03-01", EntryType::Income, 2)).unwrap();

        let export = ledger.export_csv_on(date).unwrap();
        assert_eq!(export.filename, "household_2024-06-30.csv");

        let lines: Vec<_> = export.content.lines().collect();
        assert_eq!(lines.len(), 3);
        // Export keeps storage order, unlike the sorted view
        assert!(lines[1].starts_with("\"2024-01-01\""));
    }

    #[test]
    fn test_listeners_see_each_mutation() {
        let mut ledger = new_ledger();
        let seen: Rc<RefCell<Vec<LedgerChange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ledger.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        let entry = ledger.add(candidate("2024-01-01", EntryType::Income, 5)).unwrap().unwrap();
        let missing = EntryId::new();
        ledger.remove(missing).unwrap();
        ledger.remove(entry.id).unwrap();
        ledger.clear().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], LedgerChange::Added(entry.clone()));
        assert_eq!(
            seen[1],
            LedgerChange::Removed {
                id: missing,
                entry: None
            }
        );
        assert_eq!(
            seen[2],
            LedgerChange::Removed {
                id: entry.id,
                entry: Some(entry.clone())
            }
        );
        assert_eq!(seen[3], LedgerChange::Cleared { removed: 0 });
    }

    #[test]
    fn test_reopen_restores_entries() {
        let store = MemoryStore::new();
        let mut ledger = LedgerStore::open(&store);
        ledger.add(candidate("2024-01-01", EntryType::Income, 7)).unwrap();
        ledger.add(candidate("2024-01-02", EntryType::Expense, 3)).unwrap();
        let saved = ledger.entries().to_vec();
        drop(ledger);

        let reopened = LedgerStore::open(&store);
        assert_eq!(reopened.entries(), saved.as_slice());
    }

    #[test]
    fn test_corrupt_store_opens_empty() {
        let store = MemoryStore::new();
        store.set(ENTRIES_KEY, "{ definitely not an array").unwrap();

        let mut ledger = LedgerStore::open(&store);
        assert!(ledger.is_empty());

        // The next save overwrites the garbage
        ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap();
        assert_eq!(LedgerStore::open(&store).len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut ledger = LedgerStore::open(BrokenStore);
        assert!(ledger.is_empty());

        let result = ledger.add(candidate("2024-01-01", EntryType::Income, 1));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_audit_records_mutations() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut ledger = new_ledger().with_audit(logger.clone());

        let entry = ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap().unwrap();
        ledger.add(candidate("2024-01-02", EntryType::Income, 2)).unwrap();
        ledger.remove(entry.id).unwrap();
        ledger.remove(EntryId::new()).unwrap();
        ledger.clear().unwrap();

        let ops: Vec<Operation> = logger.read_all().unwrap().iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            [Operation::Create, Operation::Create, Operation::Delete, Operation::Clear]
        );
    }

    #[test]
    fn test_open_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let mut ledger = LedgerStore::open_default(&paths, &settings).unwrap();
        ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap();

        assert!(paths.data_dir().join(format!("{}.json", ENTRIES_KEY)).exists());
        assert!(!paths.audit_log().exists());

        let reopened = LedgerStore::open_default(&paths, &settings).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.ledger_name(), "가계부");
    }

    #[test]
    fn test_open_default_with_audit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: true,
            ..Settings::default()
        };

        let mut ledger = LedgerStore::open_default(&paths, &settings).unwrap();
        ledger.add(candidate("2024-01-01", EntryType::Income, 1)).unwrap();

        let logged = AuditLogger::new(paths.audit_log()).read_all().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].operation, Operation::Create);
    }
}
