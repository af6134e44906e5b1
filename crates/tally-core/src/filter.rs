//! Transaction filter builder
//!
//! Criteria are conjunctive: a record must satisfy every criterion that is
//! set. A filter with nothing set returns every record in input order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{SavingTransaction, Transaction, TransactionType};
use crate::period::DateRange;

/// Type criterion; `All` disables type filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The single type this filter selects, `None` for `All`
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            Self::All => None,
            Self::Income => Some(TransactionType::Income),
            Self::Expense => Some(TransactionType::Expense),
        }
    }

    fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown type: {} (valid: all, income, expense)", s)),
        }
    }
}

/// Builder for in-memory transaction filters
///
/// The lifetime `'query` covers the borrowed category and search strings.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'query> {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: TypeFilter,
    pub category: Option<&'query str>,
    pub search: Option<&'query str>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set inclusive lower date bound
    pub fn start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = date;
        self
    }

    /// Set inclusive upper date bound
    pub fn end_date(mut self, date: Option<NaiveDate>) -> Self {
        self.end_date = date;
        self
    }

    /// Set both date bounds from a range
    pub fn date_range(mut self, range: Option<DateRange>) -> Self {
        self.start_date = range.map(|r| r.start);
        self.end_date = range.map(|r| r.end);
        self
    }

    /// Set type filter
    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    /// Set exact, case-sensitive category match
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Set search query (case-insensitive, description or category)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.kind == TypeFilter::All
            && self.category.is_none()
            && self.search_needle().is_none()
    }

    /// Lowercased query, untrimmed; a blank query means no search
    fn search_needle(&self) -> Option<String> {
        self.search
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with(&self, tx: &Transaction, needle: Option<&str>) -> bool {
        let day = tx.day();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        if !self.kind.accepts(tx.kind) {
            return false;
        }
        if self.category.is_some_and(|c| tx.category != c) {
            return false;
        }
        if let Some(needle) = needle {
            return tx.description.to_lowercase().contains(needle)
                || tx.category.to_lowercase().contains(needle);
        }
        true
    }

    /// Return the matching records, preserving input order
    pub fn apply(&self, records: &[Transaction]) -> Vec<Transaction> {
        let needle = self.search_needle();
        let filtered: Vec<Transaction> = records
            .iter()
            .filter(|tx| self.matches_with(tx, needle.as_deref()))
            .cloned()
            .collect();

        tracing::debug!(
            input = records.len(),
            matched = filtered.len(),
            kind = self.kind.as_str(),
            "Filtered transactions"
        );
        filtered
    }
}

/// Filter transactions; see [`TransactionFilter::apply`]
pub fn filter_transactions(
    records: &[Transaction],
    filter: &TransactionFilter<'_>,
) -> Vec<Transaction> {
    filter.apply(records)
}

/// Keep the savings movements inside `range` (inclusive, day level)
pub fn filter_savings(
    records: &[SavingTransaction],
    range: Option<DateRange>,
) -> Vec<SavingTransaction> {
    match range {
        Some(range) => records
            .iter()
            .filter(|s| range.contains(s.day()))
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}
