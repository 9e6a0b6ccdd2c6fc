use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    core::utils::ensure_dir,
    domain::transaction::{Transaction, ValidationRules},
    errors::StoreError,
};

use super::{csv_codec, LedgerBackend, Result};

const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileBackend {
    path: PathBuf,
}

impl CsvFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerBackend for CsvFileBackend {
    fn read(&self, rules: &ValidationRules) -> Result<Option<Vec<Transaction>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let transactions = csv_codec::decode(BufReader::new(file), &self.location(), rules)?;
        Ok(Some(transactions))
    }

    fn write(&self, transactions: &[&Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = tmp_path(&self.path);
        let result = write_file(&tmp, transactions)
            .and_then(|_| fs::rename(&tmp, &self.path).map_err(StoreError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_file(path: &Path, transactions: &[&Transaction]) -> Result<()> {
    let file = File::create(path)?;
    let writer = csv_codec::encode(BufWriter::new(file), transactions.iter().copied())?;
    let file = writer
        .into_inner()
        .map_err(|err| StoreError::Io(err.into_error()))?;
    file.sync_all()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
