//! Data models for Tally
//!
//! Records (`Transaction`, `SavingTransaction`) come from the store
//! collaborator. Everything else in this module is a derived value object:
//! computed on demand, owned by the caller, never persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: income, expense)",
                s
            )),
        }
    }
}

/// An income or expense record
///
/// `amount` is always a magnitude; the sign lives in `kind`.
/// `date` is local wall-clock time, grouped at day precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "record_date")]
    pub date: NaiveDateTime,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDateTime,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category: category.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Calendar day used for every day/month/year bucket
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Amount as used by the analytics engine
    ///
    /// A non-finite amount counts as 0 and a negative one as its magnitude.
    pub fn value(&self) -> f64 {
        coerce_amount(&self.id, self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// Direction of a savings movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingType {
    Deposit,
    Withdraw,
}

impl SavingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for SavingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deposit into or withdrawal from savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingTransaction {
    pub id: String,
    #[serde(with = "record_date")]
    pub date: NaiveDateTime,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "type")]
    pub kind: SavingType,
}

impl SavingTransaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDateTime,
        amount: f64,
        kind: SavingType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            note: String::new(),
            kind,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Amount with the same coercion rules as [`Transaction::value`]
    pub fn value(&self) -> f64 {
        coerce_amount(&self.id, self.amount)
    }
}

fn coerce_amount(id: &str, amount: f64) -> f64 {
    if !amount.is_finite() {
        tracing::warn!(id, amount, "Non-finite amount treated as 0");
        return 0.0;
    }
    if amount < 0.0 {
        tracing::warn!(id, amount, "Negative amount treated as its magnitude");
        return amount.abs();
    }
    amount
}

/// Parse a record timestamp
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS`, RFC 3339 with
/// an offset (the wall-clock time in that offset is kept), or a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_record_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

mod record_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_record_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record date '{}'", raw)))
    }
}

// =============================================================================
// Derived value objects
// =============================================================================

/// Headline numbers for a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

/// Headline numbers for a set of savings movements
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavingStats {
    pub total_deposit: f64,
    pub total_withdraw: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

/// One row of a category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Category breakdown, sorted by amount descending
pub type CategoryBreakdown = Vec<CategoryAmount>;

/// A category with its share of the group total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Totals for one calendar month (1-12)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl MonthlyData {
    pub fn empty(month: u32) -> Self {
        Self {
            month,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        }
    }
}

/// Totals for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

impl DailyStats {
    /// Average movement per transaction that day, income and expense combined
    pub fn average_value(&self) -> f64 {
        if self.count > 0 {
            (self.income + self.expense) / self.count as f64
        } else {
            0.0
        }
    }
}

/// A month and an amount attached to it (peak month, best savings month)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthAmount {
    pub month: u32,
    pub amount: f64,
}

/// A day and an amount attached to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Average value per transaction, split by type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AverageValue {
    pub income: f64,
    pub expense: f64,
}

/// Superlatives extracted from one year of data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub max_expense_month: Option<MonthAmount>,
    pub best_savings_month: Option<MonthAmount>,
    /// Total income / 12, regardless of how many months have data
    pub avg_monthly_income: f64,
    /// Total expense / 12, regardless of how many months have data
    pub avg_monthly_expense: f64,
    pub biggest_expense_tx: Option<Transaction>,
    pub biggest_income_tx: Option<Transaction>,
    pub total_transactions: usize,
    pub avg_transaction_value: AverageValue,
    pub top_spending_days: Vec<DayAmount>,
}

/// Full yearly summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStats {
    pub year: i32,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_income: f64,
    pub savings_rate: f64,
    pub monthly_data: Vec<MonthlyData>,
    pub category_expense: BTreeMap<String, f64>,
    pub category_income: BTreeMap<String, f64>,
    pub top_expense_categories: Vec<CategoryShare>,
    pub top_income_sources: Vec<CategoryShare>,
    pub highlights: Highlights,
    /// `yyyy-MM-dd` -> expense total; days without expense are absent
    pub heatmap_data: BTreeMap<String, f64>,
}
