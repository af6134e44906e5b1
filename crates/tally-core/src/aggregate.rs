//! Aggregation of transactions by category and by time bucket
//!
//! Every function here is a pure mapping from a record slice to a freshly
//! allocated result. Input order is never assumed; outputs that have an
//! order document it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{
    CategoryAmount, CategoryBreakdown, DailyStats, MonthlyData, Transaction, TransactionType,
};
use crate::period::DateRange;

/// Group by exact category label and sum amounts
///
/// With `kind` set, only that type is counted. Sorted by amount descending;
/// equal amounts keep the order in which their category was first seen.
pub fn aggregate_by_category(
    records: &[Transaction],
    kind: Option<TransactionType>,
) -> CategoryBreakdown {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut breakdown: CategoryBreakdown = Vec::new();

    for tx in records.iter().filter(|t| kind.map_or(true, |k| t.kind == k)) {
        let amount = tx.value();
        match index.get(tx.category.as_str()) {
            Some(&i) => breakdown[i].amount += amount,
            None => {
                index.insert(tx.category.as_str(), breakdown.len());
                breakdown.push(CategoryAmount {
                    category: tx.category.clone(),
                    amount,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    breakdown
}

/// Category totals for one type as a map keyed by category label
pub fn category_totals(records: &[Transaction], kind: TransactionType) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for tx in records.iter().filter(|t| t.kind == kind) {
        *totals.entry(tx.category.clone()).or_insert(0.0) += tx.value();
    }
    totals
}

/// Twelve monthly slots for `year`, January first
///
/// Records from other years are ignored. Months without activity are
/// present with zeros.
pub fn aggregate_by_month(records: &[Transaction], year: i32) -> Vec<MonthlyData> {
    let mut months: Vec<MonthlyData> = (1..=12).map(MonthlyData::empty).collect();

    for tx in records.iter().filter(|t| t.day().year() == year) {
        let slot = &mut months[tx.day().month0() as usize];
        match tx.kind {
            TransactionType::Income => slot.income += tx.value(),
            TransactionType::Expense => slot.expense += tx.value(),
        }
    }

    for slot in &mut months {
        slot.net = slot.income - slot.expense;
    }
    months
}

/// One entry per calendar day that has at least one record
///
/// Both type totals are always present (0 when the day has none of that
/// type). `count` includes income and expense. Ordered by date ascending.
pub fn aggregate_by_day(records: &[Transaction]) -> Vec<DailyStats> {
    let mut days: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();

    for tx in records {
        let day = days.entry(tx.day()).or_insert_with(|| DailyStats {
            date: tx.day(),
            income: 0.0,
            expense: 0.0,
            count: 0,
        });
        match tx.kind {
            TransactionType::Income => day.income += tx.value(),
            TransactionType::Expense => day.expense += tx.value(),
        }
        day.count += 1;
    }

    days.into_values().collect()
}

/// Expense total per calendar day, only for days with expense records
pub fn daily_expense_totals(records: &[Transaction]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for tx in records.iter().filter(|t| t.is_expense()) {
        *totals.entry(tx.day()).or_insert(0.0) += tx.value();
    }
    totals
}

/// Expense heatmap for `year`, keyed `yyyy-MM-dd`
///
/// Sparse: a day without expense records has no key, so "no data" and
/// "zero spend" are indistinguishable. Use [`aggregate_by_day`] when a
/// dense per-day view is needed.
pub fn heatmap(records: &[Transaction], year: i32) -> BTreeMap<String, f64> {
    let mut map = BTreeMap::new();
    for tx in records
        .iter()
        .filter(|t| t.is_expense() && t.day().year() == year)
    {
        let key = tx.day().format("%Y-%m-%d").to_string();
        *map.entry(key).or_insert(0.0) += tx.value();
    }
    map
}

/// Earliest and latest record day, `None` for an empty slice
pub fn data_date_range(records: &[Transaction]) -> Option<DateRange> {
    let start = records.iter().map(Transaction::day).min()?;
    let end = records.iter().map(Transaction::day).max()?;
    Some(DateRange { start, end })
}

/// Bucket size for [`aggregate_by_period`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    fn key_for(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Self::Daily => PeriodKey::Day(date),
            Self::Weekly => PeriodKey::Week {
                year: date.year(),
                month: date.month(),
                week: date.day().div_ceil(7),
            },
            Self::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown granularity: {} (valid: daily, weekly, monthly)",
                s
            )),
        }
    }
}

/// Bucket identifier
///
/// Weeks are counted within their month: days 1-7 are week 1, 8-14 week 2,
/// and so on, so a month has up to five weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKey {
    Day(NaiveDate),
    Week { year: i32, month: u32, week: u32 },
    Month { year: i32, month: u32 },
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%d/%m/%Y")),
            Self::Week { year, month, week } => write!(f, "Week {} {:02}/{}", week, month, year),
            Self::Month { year, month } => write!(f, "{:02}/{}", month, year),
        }
    }
}

/// Income and expense totals for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub key: PeriodKey,
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

/// Group by day, week-of-month, or month; buckets in chronological order
pub fn aggregate_by_period(
    records: &[Transaction],
    granularity: Granularity,
) -> Vec<PeriodTotals> {
    let mut buckets: BTreeMap<PeriodKey, PeriodTotals> = BTreeMap::new();

    for tx in records {
        let key = granularity.key_for(tx.day());
        let bucket = buckets.entry(key).or_insert(PeriodTotals {
            key,
            income: 0.0,
            expense: 0.0,
            count: 0,
        });
        match tx.kind {
            TransactionType::Income => bucket.income += tx.value(),
            TransactionType::Expense => bucket.expense += tx.value(),
        }
        bucket.count += 1;
    }

    tracing::debug!(
        granularity = granularity.as_str(),
        buckets = buckets.len(),
        "Aggregated transactions by period"
    );
    buckets.into_values().collect()
}
