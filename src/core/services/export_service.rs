//! Portable CSV rendering of a subset, and the matching import.
//!
//! Exports carry field values only. Identities are not written, so importing an export
//! yields equivalent transactions under newly assigned identities.

use std::io::Write;

use crate::{
    domain::{
        subset::Subset,
        transaction::{Transaction, ValidationRules},
    },
    errors::Result,
    storage::csv_codec,
};

pub const EXPORT_MIME_TYPE: &str = "text/csv";

pub struct ExportService;

impl ExportService {
    /// Renders the subset as UTF-8 CSV bytes with columns `Date, Category, Type, Amount, Notes`.
    pub fn serialize(subset: &Subset<'_>) -> Result<Vec<u8>> {
        Ok(csv_codec::encode(Vec::new(), subset.transactions())?)
    }

    /// Streams the same rendering into `writer`.
    pub fn write_to<W: Write>(subset: &Subset<'_>, writer: W) -> Result<W> {
        Ok(csv_codec::encode(writer, subset.transactions())?)
    }

    /// Decodes exported bytes, validating every row against `rules`.
    pub fn parse(bytes: &[u8], rules: &ValidationRules) -> Result<Vec<Transaction>> {
        Ok(csv_codec::decode(bytes, "<import>", rules)?)
    }
}
