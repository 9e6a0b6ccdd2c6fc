use std::cmp::Reverse;

use super::{entry::LedgerEntry, transaction::Transaction};

/// Read-only view over a selection of ledger entries.
///
/// A subset borrows from the store and is never persisted. Aggregations and the
/// export serializer consume subsets.
#[derive(Debug, Clone, Default)]
pub struct Subset<'a> {
    entries: Vec<&'a LedgerEntry>,
}

impl<'a> Subset<'a> {
    /// A view over every supplied entry, in the order given.
    pub fn all(entries: &'a [LedgerEntry]) -> Self {
        entries.iter().collect()
    }

    pub fn entries(&self) -> &[&'a LedgerEntry] {
        &self.entries
    }

    pub fn transactions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.entries.iter().copied().map(LedgerEntry::transaction)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by date, most recent first. Entries sharing a date keep their
    /// relative order.
    pub fn newest_first(&self) -> Vec<&'a LedgerEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| Reverse(entry.date()));
        sorted
    }
}

impl<'a> FromIterator<&'a LedgerEntry> for Subset<'a> {
    fn from_iter<I: IntoIterator<Item = &'a LedgerEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s Subset<'a> {
    type Item = &'a LedgerEntry;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a LedgerEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
