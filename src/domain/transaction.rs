use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Largest amount a single transaction may carry (10^15). Keeps ledger-wide sums well inside
/// `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Classification of a ledger entry.
///
/// `Income` and `Expense` drive the headline totals. The remaining members only
/// exist when the configuration enables them and are reported in the monthly and
/// per-category breakdowns under their own name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TransactionKind {
    Income,
    Expense,
    Savings,
    Investment,
    Other(String),
}

impl TransactionKind {
    /// The two kinds every ledger understands.
    pub fn standard() -> Vec<TransactionKind> {
        vec![TransactionKind::Income, TransactionKind::Expense]
    }

    /// Standard kinds plus the savings/investment buckets.
    pub fn extended() -> Vec<TransactionKind> {
        vec![
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::Savings,
            TransactionKind::Investment,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Savings => "Savings",
            TransactionKind::Investment => "Investment",
            TransactionKind::Other(name) => name,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionKind::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::UnknownKind(raw.to_string()));
        }
        let kind = match name.to_ascii_lowercase().as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            "savings" => TransactionKind::Savings,
            "investment" => TransactionKind::Investment,
            _ => TransactionKind::Other(name.to_string()),
        };
        Ok(kind)
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        value
            .parse()
            .unwrap_or(TransactionKind::Other(value))
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

/// How category labels are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Any non-empty label.
    #[default]
    FreeText,
    /// Only the listed labels (compared case-insensitively).
    Closed { names: Vec<String> },
}

impl CategoryPolicy {
    fn resolve(&self, category: &str) -> Result<String, ValidationError> {
        match self {
            CategoryPolicy::FreeText => Ok(category.to_string()),
            CategoryPolicy::Closed { names } => names
                .iter()
                .map(|name| name.trim())
                .find(|name| name.eq_ignore_ascii_case(category))
                .map(str::to_string)
                .ok_or_else(|| ValidationError::UnknownCategory(category.to_string())),
        }
    }
}

/// The configured vocabulary a transaction must conform to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub kinds: Vec<TransactionKind>,
    #[serde(default)]
    pub categories: CategoryPolicy,
}

impl ValidationRules {
    pub fn new(kinds: Vec<TransactionKind>, categories: CategoryPolicy) -> Self {
        Self { kinds, categories }
    }

    pub fn allows_kind(&self, kind: &TransactionKind) -> bool {
        self.configured_kind(kind).is_some()
    }

    /// The configured spelling of `kind`. Custom kinds compare case-insensitively.
    fn configured_kind(&self, kind: &TransactionKind) -> Option<&TransactionKind> {
        self.kinds.iter().find(|configured| match (configured, kind) {
            (TransactionKind::Other(listed), TransactionKind::Other(name)) => {
                listed.trim().eq_ignore_ascii_case(name)
            }
            _ => *configured == kind,
        })
    }

    /// Confirms that an already validated transaction also fits these rules.
    pub fn check(&self, txn: &Transaction) -> Result<(), ValidationError> {
        if !self.allows_kind(txn.kind()) {
            return Err(ValidationError::UnknownKind(txn.kind().to_string()));
        }
        self.categories.resolve(txn.category()).map(|_| ())
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(TransactionKind::standard(), CategoryPolicy::FreeText)
    }
}

/// Unvalidated input for a new ledger entry, as collected by a form or read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub category: String,
    pub kind: String,
    pub amount: Decimal,
    pub notes: String,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        kind: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            kind: kind.into(),
            amount,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A validated income/expense record.
///
/// Values are immutable once built; edits are expressed by replacing the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    date: NaiveDate,
    category: String,
    kind: TransactionKind,
    amount: Decimal,
    notes: String,
}

impl Transaction {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Checks a draft against the configured rules and produces a [`Transaction`].
pub fn validate(
    draft: TransactionDraft,
    rules: &ValidationRules,
) -> Result<Transaction, ValidationError> {
    let category = draft.category.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if draft.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(draft.amount));
    }
    if draft.amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(draft.amount));
    }
    let parsed: TransactionKind = draft.kind.parse()?;
    let kind = match rules.configured_kind(&parsed) {
        Some(kind) => kind.clone(),
        None => return Err(ValidationError::UnknownKind(draft.kind)),
    };
    let category = rules.categories.resolve(category)?;

    Ok(Transaction {
        date: draft.date,
        category,
        kind,
        amount: draft.amount,
        notes: draft.notes,
    })
}
