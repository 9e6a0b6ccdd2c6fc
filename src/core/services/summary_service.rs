//! Headline totals and breakdowns over a subset of ledger history.

use rust_decimal::Decimal;

use crate::domain::{
    subset::Subset,
    summary::{CategoryBreakdown, MonthKey, MonthlySeries, Totals},
    transaction::TransactionKind,
};

pub struct SummaryService;

impl SummaryService {
    /// Sums income and expense records. Other kinds (savings, investments, custom
    /// kinds) are left out of both figures.
    pub fn totals(subset: &Subset<'_>) -> Totals {
        let (income, expense) = subset.transactions().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), txn| match txn.kind() {
                TransactionKind::Income => (income + txn.amount(), expense),
                TransactionKind::Expense => (income, expense + txn.amount()),
                _ => (income, expense),
            },
        );
        Totals::from_parts(income, expense)
    }

    /// Amounts summed per calendar month and kind, every kind included.
    pub fn monthly_series(subset: &Subset<'_>) -> MonthlySeries {
        let mut series = MonthlySeries::default();
        for txn in subset.transactions() {
            series.add(MonthKey::of(txn.date()), txn.kind(), txn.amount());
        }
        series
    }

    /// Amounts summed per category for records of `kind`, keyed by category name.
    pub fn category_breakdown(subset: &Subset<'_>, kind: &TransactionKind) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::new(kind.clone());
        for txn in subset.transactions().filter(|txn| txn.kind() == kind) {
            *breakdown
                .amounts
                .entry(txn.category().to_string())
                .or_insert(Decimal::ZERO) += txn.amount();
        }
        breakdown
    }

    /// Category breakdown of spending.
    pub fn expense_breakdown(subset: &Subset<'_>) -> CategoryBreakdown {
        Self::category_breakdown(subset, &TransactionKind::Expense)
    }
}
