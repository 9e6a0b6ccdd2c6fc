use std::result::Result as StdResult;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a candidate transaction is refused by the record model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} exceeds the largest accepted amount")]
    AmountTooLarge(Decimal),
    #[error("unknown transaction type `{0}`")]
    UnknownKind(String),
    #[error("category `{0}` is not in the configured category list")]
    UnknownCategory(String),
}

/// Failures raised while reading or writing the durable ledger.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger store `{location}` is corrupt{}: {reason}", line_suffix(.line))]
    Corrupt {
        location: String,
        line: Option<u64>,
        reason: String,
    },
    #[error("ledger not loaded")]
    NotLoaded,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn corrupt(
        location: impl Into<String>,
        line: Option<u64>,
        reason: impl Into<String>,
    ) -> Self {
        StoreError::Corrupt {
            location: location.into(),
            line,
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("budget limit must be greater than zero (got {0})")]
    NonPositiveBudget(Decimal),
    #[error("at least one transaction type must be configured")]
    EmptyKindSet,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

/// Unified error type surfaced by the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("transaction {0} not found")]
    NotFound(Uuid),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Store(StoreError::Io(err))
    }
}

pub type Result<T> = StdResult<T, LedgerError>;
