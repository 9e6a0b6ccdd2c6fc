#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use accounts_core::{
    config::LedgerConfig,
    core::LedgerStore,
    domain::{validate, Transaction, TransactionDraft, ValidationRules},
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A loaded store backed by a fresh CSV file, plus the configuration it was built from.
pub fn setup_test_env() -> (LedgerStore, LedgerConfig) {
    let config = LedgerConfig::in_dir(&temp_base());
    let mut store = LedgerStore::open_csv(&config.data_file, config.rules());
    store.load().expect("load fresh ledger");
    (store, config)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn txn(
    date: NaiveDate,
    category: &str,
    kind: &str,
    amount: Decimal,
    notes: &str,
) -> Transaction {
    validate(
        TransactionDraft::new(date, category, kind, amount).with_notes(notes),
        &ValidationRules::default(),
    )
    .expect("valid transaction")
}
