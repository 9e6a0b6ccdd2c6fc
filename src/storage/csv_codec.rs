//! Tabular text encoding shared by the durable store and the export serializer.
//!
//! Columns are written in the fixed order `Date, Category, Type, Amount, Notes`.
//! Dates use ISO-8601 calendar form and amounts keep their full decimal precision.

use std::{io::Read, io::Write, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;

use crate::{
    domain::transaction::{validate, Transaction, TransactionDraft, ValidationRules},
    errors::StoreError,
};

pub const HEADER: [&str; 5] = ["Date", "Category", "Type", "Amount", "Notes"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the header row followed by one row per transaction and hands the writer back.
pub fn encode<'a, W, I>(writer: W, transactions: I) -> Result<W, StoreError>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|err| csv_error("<output>", err))?;
    for txn in transactions {
        let date = txn.date().format(DATE_FORMAT).to_string();
        let amount = txn.amount().to_string();
        csv_writer
            .write_record([
                date.as_str(),
                txn.category(),
                txn.kind().as_str(),
                amount.as_str(),
                txn.notes(),
            ])
            .map_err(|err| csv_error("<output>", err))?;
    }
    csv_writer.flush()?;
    csv_writer
        .into_inner()
        .map_err(|err| StoreError::Io(err.into_error()))
}

/// Parses every row and validates it against `rules`.
///
/// Any row that cannot be read, parsed, or validated fails the whole decode; `location`
/// names the source in the resulting error.
pub fn decode<R: Read>(
    reader: R,
    location: &str,
    rules: &ValidationRules,
) -> Result<Vec<Transaction>, StoreError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| csv_error(location, err))?
        .clone();
    let columns = Columns::locate(&headers)
        .map_err(|reason| StoreError::corrupt(location, Some(1), reason))?;

    let mut transactions = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|err| csv_error(location, err))?;
        let line = record.position().map(|pos| pos.line());
        let draft = columns
            .draft(&record)
            .map_err(|reason| StoreError::corrupt(location, line, reason))?;
        let txn = validate(draft, rules)
            .map_err(|err| StoreError::corrupt(location, line, err.to_string()))?;
        transactions.push(txn);
    }
    Ok(transactions)
}

/// Positions of the canonical columns within a header row.
struct Columns {
    date: usize,
    category: usize,
    kind: usize,
    amount: usize,
    notes: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, String> {
        if headers.iter().all(|name| name.trim().is_empty()) {
            return Err("missing header row".into());
        }
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|name| normalize_header(name) == wanted)
                .ok_or_else(|| format!("missing `{wanted}` column"))
        };
        Ok(Self {
            date: find(HEADER[0])?,
            category: find(HEADER[1])?,
            kind: find(HEADER[2])?,
            amount: find(HEADER[3])?,
            notes: find(HEADER[4])?,
        })
    }

    fn draft(&self, record: &StringRecord) -> Result<TransactionDraft, String> {
        let field = |index: usize| record.get(index).unwrap_or("");
        let date = parse_date(field(self.date))?;
        let amount = parse_amount(field(self.amount))?;
        Ok(TransactionDraft::new(date, field(self.category), field(self.kind), amount)
            .with_notes(field(self.notes)))
    }
}

fn normalize_header(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let value = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    // Older files may carry a midnight timestamp.
    match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        Ok(stamp) if stamp.time() == NaiveTime::MIN => Ok(stamp.date()),
        Ok(_) => Err(format!("date `{value}` carries a time of day")),
        Err(_) => Err(format!("unparseable date `{value}`")),
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("missing amount".into());
    }
    Decimal::from_str(value).map_err(|_| format!("non-numeric amount `{value}`"))
}

fn csv_error(location: &str, err: csv::Error) -> StoreError {
    let line = err.position().map(|pos| pos.line());
    match err.into_kind() {
        csv::ErrorKind::Io(io) => StoreError::Io(io),
        kind => StoreError::corrupt(location, line, describe(kind)),
    }
}

fn describe(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { .. } => "row is not valid UTF-8".into(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields but found {len}"),
        other => format!("{other:?}"),
    }
}
