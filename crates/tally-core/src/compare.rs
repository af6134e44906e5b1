//! Period-over-period comparison
//!
//! A trend is the signed percentage change of a metric between two
//! comparable periods. Whether a change is good depends on the metric, so
//! every comparison takes a [`Polarity`].

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CategoryAmount, DailyStats, YearlyStats};
use crate::period::DateRange;

/// Which direction of change is favorable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Income, balance, savings rate
    HigherIsBetter,
    /// Expenses
    LowerIsBetter,
}

/// Headline metrics that get compared between periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Income,
    Expense,
    Balance,
    SavingsRate,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Balance => "balance",
            Self::SavingsRate => "savings_rate",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Expense => Polarity::LowerIsBetter,
            Self::Income | Self::Balance | Self::SavingsRate => Polarity::HigherIsBetter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of comparing a metric with its previous value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    Change {
        /// `(current - previous) / |previous| * 100`
        percent: f64,
        direction: Direction,
        /// True only for a strict move in the good direction
        favorable: bool,
    },
    /// The previous value is 0 (or unusable), so no percentage exists
    NoPriorData,
}

impl Comparison {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Change { percent, .. } => Some(*percent),
            Self::NoPriorData => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Change { direction, .. } => Some(*direction),
            Self::NoPriorData => None,
        }
    }

    pub fn is_favorable(&self) -> bool {
        matches!(self, Self::Change { favorable: true, .. })
    }
}

/// Compare `current` against `previous`
pub fn compare_adjacent_period(current: f64, previous: f64, polarity: Polarity) -> Comparison {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return Comparison::NoPriorData;
    }

    let percent = (current - previous) / previous.abs() * 100.0;
    let direction = if percent > 0.0 {
        Direction::Up
    } else if percent < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };
    let favorable = match polarity {
        Polarity::HigherIsBetter => direction == Direction::Up,
        Polarity::LowerIsBetter => direction == Direction::Down,
    };

    Comparison::Change {
        percent,
        direction,
        favorable,
    }
}

/// Compare a metric using its default polarity
pub fn compare_metric(metric: Metric, current: f64, previous: f64) -> Comparison {
    compare_adjacent_period(current, previous, metric.polarity())
}

/// The period a dashboard range is compared against
///
/// Both ends shift back one calendar month, see [`DateRange::previous_month`].
pub fn previous_period(range: &DateRange) -> Option<DateRange> {
    range.previous_month()
}

/// One category of the current period next to its previous-period amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub category: String,
    pub amount: f64,
    /// 0 when the category had no activity in the previous period
    pub previous_amount: f64,
    pub difference: f64,
    pub comparison: Comparison,
}

/// Line up each current category with its previous amount
///
/// Output follows the order of `current`. Categories that only appear in
/// `previous` are not reported.
pub fn compare_categories(
    current: &[CategoryAmount],
    previous: &[CategoryAmount],
    polarity: Polarity,
) -> Vec<CategoryComparison> {
    let previous_by_name: HashMap<&str, f64> = previous
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();

    current
        .iter()
        .map(|c| {
            let previous_amount = previous_by_name
                .get(c.category.as_str())
                .copied()
                .unwrap_or(0.0);
            CategoryComparison {
                category: c.category.clone(),
                amount: c.amount,
                previous_amount,
                difference: c.amount - previous_amount,
                comparison: compare_adjacent_period(c.amount, previous_amount, polarity),
            }
        })
        .collect()
}

/// A day's expense next to the previous day that has data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    /// `None` for the earliest day
    pub expense_difference: Option<f64>,
    pub average_value: f64,
}

/// Day-over-day expense changes, newest day first
///
/// The "previous day" is the chronologically preceding entry of `daily`,
/// which may be more than one calendar day earlier.
pub fn daily_changes(daily: &[DailyStats]) -> Vec<DailyChange> {
    let mut sorted = daily.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .iter()
        .enumerate()
        .map(|(i, day)| DailyChange {
            date: day.date,
            income: day.income,
            expense: day.expense,
            expense_difference: sorted.get(i + 1).map(|prev| day.expense - prev.expense),
            average_value: day.average_value(),
        })
        .collect()
}

/// Headline trends between two yearly summaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub year: i32,
    pub previous_year: i32,
    pub income: Comparison,
    pub expense: Comparison,
    pub net_income: Comparison,
    pub savings_rate: Comparison,
}

pub fn compare_years(current: &YearlyStats, previous: &YearlyStats) -> YearComparison {
    YearComparison {
        year: current.year,
        previous_year: previous.year,
        income: compare_metric(Metric::Income, current.total_income, previous.total_income),
        expense: compare_metric(
            Metric::Expense,
            current.total_expense,
            previous.total_expense,
        ),
        net_income: compare_metric(Metric::Balance, current.net_income, previous.net_income),
        savings_rate: compare_metric(
            Metric::SavingsRate,
            current.savings_rate,
            previous.savings_rate,
        ),
    }
}
