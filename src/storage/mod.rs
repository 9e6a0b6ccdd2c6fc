pub mod csv_backend;
pub mod csv_codec;

use crate::{
    domain::transaction::{Transaction, ValidationRules},
    errors::StoreError,
};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over durable homes for the ledger.
///
/// Backends always read and write the complete record set; `write` must replace the
/// previous contents atomically so a failed write leaves the old data readable.
pub trait LedgerBackend: Send + Sync {
    /// Reads every stored record, or `None` when nothing has been stored yet.
    fn read(&self, rules: &ValidationRules) -> Result<Option<Vec<Transaction>>>;
    fn write(&self, transactions: &[&Transaction]) -> Result<()>;
    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;
}

pub use csv_backend::CsvFileBackend;
pub use csv_codec::HEADER;
