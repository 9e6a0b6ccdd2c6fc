//! Compares monthly spending with the configured budget limit.

use rust_decimal::Decimal;

use crate::domain::{
    subset::Subset,
    summary::{BudgetStatus, MonthlyBudget},
    transaction::TransactionKind,
};
use crate::errors::ConfigError;

use super::SummaryService;

/// Stateless budgeting helpers. Only `Expense` records count as spending.
pub struct BudgetService;

impl BudgetService {
    /// Spending against `limit`; `fraction_used` is clamped into `[0, 1]` while
    /// `remaining` goes negative once the limit is exceeded.
    pub fn budget_status(spent: Decimal, limit: Decimal) -> Result<BudgetStatus, ConfigError> {
        if limit <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBudget(limit));
        }
        let fraction_used = spent
            .checked_div(limit)
            .map_or(Decimal::ONE, |fraction| fraction.clamp(Decimal::ZERO, Decimal::ONE));
        Ok(BudgetStatus {
            limit,
            spent,
            remaining: limit.saturating_sub(spent),
            fraction_used,
        })
    }

    /// One status per month with expense activity, oldest month first.
    pub fn monthly_budget(
        subset: &Subset<'_>,
        limit: Decimal,
    ) -> Result<Vec<MonthlyBudget>, ConfigError> {
        if limit <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBudget(limit));
        }
        let series = SummaryService::monthly_series(subset);
        series
            .for_kind(&TransactionKind::Expense)
            .into_iter()
            .map(|(month, spent)| {
                Self::budget_status(spent, limit).map(|status| MonthlyBudget { month, status })
            })
            .collect()
    }
}
