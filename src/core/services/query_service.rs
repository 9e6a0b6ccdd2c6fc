//! Selection of ledger history by calendar date.

use chrono::NaiveDate;

use crate::domain::{entry::LedgerEntry, range::DateRange, subset::Subset};
use crate::errors::QueryError;

pub struct QueryService;

impl QueryService {
    /// Entries dated within `[start, end]`, both ends inclusive, in storage order.
    ///
    /// `start > end` is reported as [`QueryError::InvalidRange`]; an empty ledger simply
    /// yields an empty subset.
    pub fn filter_by_date_range(
        entries: &[LedgerEntry],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Subset<'_>, QueryError> {
        let range = DateRange::new(start, end)?;
        Ok(Self::filter(entries, range))
    }

    pub fn filter(entries: &[LedgerEntry], range: DateRange) -> Subset<'_> {
        entries
            .iter()
            .filter(|entry| range.contains(entry.date()))
            .collect()
    }

    /// Narrows an existing subset further.
    pub fn refine<'a>(subset: &Subset<'a>, range: DateRange) -> Subset<'a> {
        subset
            .into_iter()
            .filter(|entry| range.contains(entry.date()))
            .collect()
    }

    /// Span from the earliest to the latest dated entry, `None` for an empty ledger.
    pub fn default_range(entries: &[LedgerEntry]) -> Option<DateRange> {
        let start = entries.iter().map(|entry| entry.date()).min()?;
        let end = entries.iter().map(|entry| entry.date()).max()?;
        Some(DateRange::new(start, end).unwrap_or_else(|_| DateRange::single_day(start)))
    }
}
