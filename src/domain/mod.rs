pub mod common;
pub mod entry;
pub mod range;
pub mod subset;
pub mod summary;
pub mod transaction;

pub use common::Identifiable;
pub use entry::LedgerEntry;
pub use range::DateRange;
pub use subset::Subset;
pub use summary::{
    BudgetStatus, CategoryBreakdown, MonthKey, MonthlyAmount, MonthlyBudget, MonthlySeries,
    Totals,
};
pub use transaction::{
    validate, CategoryPolicy, Transaction, TransactionDraft, TransactionKind, ValidationRules,
    MAX_AMOUNT,
};
