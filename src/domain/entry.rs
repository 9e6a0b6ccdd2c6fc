use std::ops::Deref;

use uuid::Uuid;

use super::{common::Identifiable, transaction::Transaction};

/// A transaction held by the ledger store together with its identity.
///
/// The identity is minted when the record enters a store and is never reused,
/// so it stays valid no matter how a view is filtered or sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    id: Uuid,
    transaction: Transaction,
}

impl LedgerEntry {
    /// Wraps a validated transaction under a freshly generated identity.
    pub fn new(transaction: Transaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> Uuid {
        LedgerEntry::id(self)
    }
}

impl Deref for LedgerEntry {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.transaction
    }
}
