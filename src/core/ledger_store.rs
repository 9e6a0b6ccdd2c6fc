use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        entry::LedgerEntry,
        subset::Subset,
        transaction::{validate, Transaction, TransactionDraft, ValidationRules},
    },
    errors::{LedgerError, Result, StoreError},
    storage::{CsvFileBackend, LedgerBackend},
};

/// Owns the authoritative set of transactions and keeps it in step with durable storage.
///
/// Every mutation writes the complete record set through the backend before the
/// in-memory state changes, so a failed write leaves both sides untouched.
pub struct LedgerStore {
    backend: Box<dyn LedgerBackend>,
    rules: ValidationRules,
    entries: Vec<LedgerEntry>,
    loaded: bool,
}

impl LedgerStore {
    pub fn new(backend: Box<dyn LedgerBackend>, rules: ValidationRules) -> Self {
        Self {
            backend,
            rules,
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Store backed by a CSV file at `path`.
    pub fn open_csv(path: impl Into<PathBuf>, rules: ValidationRules) -> Self {
        Self::new(Box::new(CsvFileBackend::new(path)), rules)
    }

    pub fn backend(&self) -> &dyn LedgerBackend {
        self.backend.as_ref()
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the durable ledger, replacing anything held in memory.
    ///
    /// When nothing has been stored yet an empty, header-only ledger is written and an
    /// empty set returned. Identities are minted afresh on every load.
    pub fn load(&mut self) -> Result<&[LedgerEntry]> {
        let stored = self.backend.read(&self.rules).map_err(|err| {
            if let StoreError::Corrupt {
                location,
                line,
                reason,
            } = &err
            {
                warn!(%location, ?line, %reason, "refusing to load corrupt ledger");
            }
            err
        })?;
        let transactions = match stored {
            Some(transactions) => transactions,
            None => {
                info!(location = %self.backend.location(), "initializing empty ledger");
                self.backend.write(&[])?;
                Vec::new()
            }
        };
        self.entries = transactions.into_iter().map(LedgerEntry::new).collect();
        self.loaded = true;
        info!(
            location = %self.backend.location(),
            count = self.entries.len(),
            "ledger loaded"
        );
        Ok(&self.entries)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// View over every loaded entry in storage order.
    pub fn subset(&self) -> Subset<'_> {
        Subset::all(&self.entries)
    }

    pub fn get(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a validated transaction, persists, and returns its new identity.
    pub fn append(&mut self, transaction: Transaction) -> Result<Uuid> {
        self.ensure_loaded()?;
        self.rules.check(&transaction)?;
        let entry = LedgerEntry::new(transaction);
        let id = entry.id();
        let mut next = self.entries.clone();
        next.push(entry);
        self.persist(next)?;
        debug!(%id, "transaction appended");
        Ok(id)
    }

    /// Validates a draft with the store's rules and appends it.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Uuid> {
        let transaction = validate(draft, &self.rules)?;
        self.append(transaction)
    }

    /// Removes the entry with `id`, persists, and returns the removed transaction.
    ///
    /// An unknown identity fails with [`LedgerError::NotFound`] and leaves the store as it was.
    pub fn delete_by_identity(&mut self, id: Uuid) -> Result<Transaction> {
        self.ensure_loaded()?;
        let position = self.position(id)?;
        let mut next = self.entries.clone();
        let removed = next.remove(position);
        self.persist(next)?;
        debug!(%id, "transaction deleted");
        Ok(removed.into_transaction())
    }

    /// Swaps the entry with `id` for `transaction` in a single write.
    ///
    /// The replacement receives a new identity, which is returned.
    pub fn replace(&mut self, id: Uuid, transaction: Transaction) -> Result<Uuid> {
        self.ensure_loaded()?;
        self.rules.check(&transaction)?;
        let position = self.position(id)?;
        let entry = LedgerEntry::new(transaction);
        let new_id = entry.id();
        let mut next = self.entries.clone();
        next.remove(position);
        next.push(entry);
        self.persist(next)?;
        debug!(old = %id, new = %new_id, "transaction replaced");
        Ok(new_id)
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| {
                warn!(%id, "no transaction with this identity");
                LedgerError::NotFound(id)
            })
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(StoreError::NotLoaded.into())
        }
    }

    fn persist(&mut self, next: Vec<LedgerEntry>) -> Result<()> {
        let snapshot: Vec<&Transaction> = next.iter().map(LedgerEntry::transaction).collect();
        self.backend.write(&snapshot)?;
        self.entries = next;
        debug!(count = self.entries.len(), "ledger persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::transaction::{CategoryPolicy, TransactionKind},
        errors::ValidationError,
        storage,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    };

    /// In-memory backend whose writes can be made to fail on demand.
    #[derive(Clone, Default)]
    struct MemoryBackend {
        stored: Arc<Mutex<Option<Vec<Transaction>>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MemoryBackend {
        fn stored(&self) -> Option<Vec<Transaction>> {
            self.stored.lock().unwrap().clone()
        }
    }

    impl LedgerBackend for MemoryBackend {
        fn read(&self, _rules: &ValidationRules) -> storage::Result<Option<Vec<Transaction>>> {
            Ok(self.stored())
        }

        fn write(&self, transactions: &[&Transaction]) -> storage::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            *self.stored.lock().unwrap() =
                Some(transactions.iter().map(|txn| (*txn).clone()).collect());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".into()
        }
    }

    struct CorruptBackend;

    impl LedgerBackend for CorruptBackend {
        fn read(&self, _rules: &ValidationRules) -> storage::Result<Option<Vec<Transaction>>> {
            Err(StoreError::corrupt("memory", Some(3), "non-numeric amount `lots`"))
        }

        fn write(&self, _transactions: &[&Transaction]) -> storage::Result<()> {
            panic!("a corrupt ledger must not be rewritten");
        }

        fn location(&self) -> String {
            "memory".into()
        }
    }

    fn txn(day: u32, category: &str, kind: &str, amount: rust_decimal::Decimal) -> Transaction {
        validate(
            TransactionDraft::new(
                NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                category,
                kind,
                amount,
            ),
            &ValidationRules::default(),
        )
        .unwrap()
    }

    fn loaded_store() -> (LedgerStore, MemoryBackend) {
        let backend = MemoryBackend::default();
        let mut store = LedgerStore::new(Box::new(backend.clone()), ValidationRules::default());
        store.load().unwrap();
        (store, backend)
    }

    #[test]
    fn first_load_initializes_empty_durable_ledger() {
        let (store, backend) = loaded_store();
        assert!(store.is_empty());
        assert_eq!(backend.stored(), Some(Vec::new()));
    }

    #[test]
    fn corrupt_ledger_is_reported_and_left_unloaded() {
        crate::utils::init_tracing();
        let mut store = LedgerStore::new(Box::new(CorruptBackend), ValidationRules::default());
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Store(StoreError::Corrupt { line: Some(3), .. })
        ));
        assert!(!store.is_loaded());
        assert!(matches!(
            store.append(txn(1, "Rent", "Expense", dec!(900))),
            Err(LedgerError::Store(StoreError::NotLoaded))
        ));
    }

    #[test]
    fn mutations_require_a_load() {
        let backend = MemoryBackend::default();
        let mut store = LedgerStore::new(Box::new(backend.clone()), ValidationRules::default());
        let err = store
            .append(txn(5, "Salary", "Income", dec!(1)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Store(StoreError::NotLoaded)));
        assert_eq!(backend.stored(), None);
    }

    #[test]
    fn identities_are_unique_and_survive_other_deletions() {
        let (mut store, _) = loaded_store();
        let a = store.append(txn(1, "A", "Expense", dec!(1))).unwrap();
        let b = store.append(txn(2, "B", "Expense", dec!(2))).unwrap();
        store.delete_by_identity(a).unwrap();
        let c = store.append(txn(3, "C", "Expense", dec!(3))).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(store.get(b).unwrap().category(), "B");
        assert_eq!(store.get(c).unwrap().category(), "C");
    }

    #[test]
    fn failed_write_leaves_memory_and_disk_unchanged() {
        let (mut store, backend) = loaded_store();
        let kept = store.append(txn(1, "Rent", "Expense", dec!(900))).unwrap();

        backend.fail_writes.store(true, Ordering::SeqCst);
        let err = store
            .append(txn(2, "Fuel", "Expense", dec!(40)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Store(StoreError::Io(_))));
        assert!(store.delete_by_identity(kept).is_err());

        assert_eq!(store.len(), 1);
        assert!(store.get(kept).is_some());
        assert_eq!(backend.stored().unwrap().len(), 1);
    }

    #[test]
    fn deleting_unknown_identity_is_reported() {
        let (mut store, backend) = loaded_store();
        store.append(txn(1, "Rent", "Expense", dec!(900))).unwrap();
        let missing = Uuid::new_v4();
        let err = store.delete_by_identity(missing).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(id) if id == missing));
        assert_eq!(store.len(), 1);
        assert_eq!(backend.stored().unwrap().len(), 1);
    }

    #[test]
    fn replace_swaps_record_under_new_identity() {
        let (mut store, backend) = loaded_store();
        let old = store.append(txn(1, "Rent", "Expense", dec!(900))).unwrap();
        let new = store
            .replace(old, txn(1, "Rent", "Expense", dec!(950)))
            .unwrap();

        assert_ne!(old, new);
        assert!(store.get(old).is_none());
        assert_eq!(store.get(new).unwrap().amount(), dec!(950));
        assert_eq!(backend.stored().unwrap()[0].amount(), dec!(950));
    }

    #[test]
    fn add_surfaces_specific_validation_reason() {
        let (mut store, _) = loaded_store();
        let draft = TransactionDraft::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Rent",
            "Expense",
            dec!(0),
        );
        let err = store.add(draft).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::NonPositiveAmount(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn append_rejects_transactions_outside_store_rules() {
        let backend = MemoryBackend::default();
        let rules = ValidationRules::new(
            TransactionKind::standard(),
            CategoryPolicy::Closed {
                names: vec!["Rent".into()],
            },
        );
        let mut store = LedgerStore::new(Box::new(backend), rules);
        store.load().unwrap();

        let err = store
            .append(txn(1, "Travel", "Expense", dec!(10)))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn reload_reads_back_persisted_records() {
        let (mut store, backend) = loaded_store();
        store.append(txn(5, "Salary", "Income", dec!(50000))).unwrap();

        let mut reopened = LedgerStore::new(Box::new(backend), ValidationRules::default());
        let entries = reopened.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category(), "Salary");
    }
}
