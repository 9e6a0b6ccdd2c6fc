use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Income/expense headline figures for a subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn from_parts(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Calendar month bucket, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        MonthKey::of(date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One bar of the month-by-kind chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: MonthKey,
    pub kind: TransactionKind,
    pub amount: Decimal,
}

/// Summed amounts keyed by `(month, kind)`, iterated chronologically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySeries {
    amounts: BTreeMap<(MonthKey, TransactionKind), Decimal>,
}

impl MonthlySeries {
    pub(crate) fn add(&mut self, month: MonthKey, kind: &TransactionKind, amount: Decimal) {
        *self
            .amounts
            .entry((month, kind.clone()))
            .or_insert(Decimal::ZERO) += amount;
    }

    /// The summed amount for a bucket, `None` when the subset had no such records.
    pub fn amount(&self, month: MonthKey, kind: &TransactionKind) -> Option<Decimal> {
        self.amounts.get(&(month, kind.clone())).copied()
    }

    /// Distinct months present in the series, oldest first.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.amounts.keys().map(|(month, _)| *month).collect();
        months.dedup();
        months
    }

    /// Per-month totals for a single kind, oldest first.
    pub fn for_kind(&self, kind: &TransactionKind) -> BTreeMap<MonthKey, Decimal> {
        self.amounts
            .iter()
            .filter(|((_, bucket), _)| bucket == kind)
            .map(|((month, _), amount)| (*month, *amount))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = MonthlyAmount> + '_ {
        self.amounts
            .iter()
            .map(|((month, kind), amount)| MonthlyAmount {
                month: *month,
                kind: kind.clone(),
                amount: *amount,
            })
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Summed amounts per category for one kind, sorted by category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub kind: TransactionKind,
    pub amounts: BTreeMap<String, Decimal>,
}

impl CategoryBreakdown {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            amounts: BTreeMap::new(),
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.amounts.get(category).copied()
    }

    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }
}

/// Spending measured against a budget limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub limit: Decimal,
    pub spent: Decimal,
    /// May go negative once the limit is exceeded.
    pub remaining: Decimal,
    /// `spent / limit` clamped into `[0, 1]`.
    pub fraction_used: Decimal,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub month: MonthKey,
    pub status: BudgetStatus,
}
