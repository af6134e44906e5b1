//! Rule-based insights over a yearly summary
//!
//! Rules run in a fixed order and each contributes at most one insight:
//!
//! 1. Largest expense category (when any expense exists)
//! 2. Savings assessment (exactly one of excellent, positive or deficit)
//! 3. Peak spending month (when any month has expense)

use std::fmt;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::config::InsightThresholds;
use crate::models::YearlyStats;

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }
}

/// A single observation about a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    LargestCategory { category: String, amount: f64 },
    ExcellentSavings { rate: f64 },
    PositiveSavings { rate: f64 },
    SavingsDeficit { rate: f64 },
    PeakSpendingMonth { month: u32, amount: f64 },
}

impl Insight {
    pub fn severity(&self) -> Severity {
        match self {
            Insight::LargestCategory { .. } | Insight::ExcellentSavings { .. } => Severity::Info,
            Insight::PositiveSavings { .. } | Insight::PeakSpendingMonth { .. } => {
                Severity::Attention
            }
            Insight::SavingsDeficit { .. } => Severity::Warning,
        }
    }
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("Unknown month", |m| m.name())
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::LargestCategory { category, amount } => {
                write!(f, "Largest expense category: {} ({:.2})", category, amount)
            }
            Insight::ExcellentSavings { rate } => {
                write!(f, "Excellent! You saved {:.1}% of your income", rate)
            }
            Insight::PositiveSavings { rate } => write!(
                f,
                "You saved {:.1}% of your income; there is room to save more",
                rate
            ),
            Insight::SavingsDeficit { rate } => write!(
                f,
                "Spending exceeded income (savings rate {:.1}%)",
                rate
            ),
            Insight::PeakSpendingMonth { month, amount } => write!(
                f,
                "Peak spending month: {} ({:.2})",
                month_name(*month),
                amount
            ),
        }
    }
}

/// Run every rule against `stats`, in rule order
pub fn generate_insights(stats: &YearlyStats, thresholds: &InsightThresholds) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(top) = stats.top_expense_categories.first() {
        insights.push(Insight::LargestCategory {
            category: top.category.clone(),
            amount: top.amount,
        });
    }

    let rate = stats.savings_rate;
    insights.push(if rate > thresholds.excellent_savings_rate {
        Insight::ExcellentSavings { rate }
    } else if rate > thresholds.positive_savings_rate {
        Insight::PositiveSavings { rate }
    } else {
        Insight::SavingsDeficit { rate }
    });

    if let Some(peak) = stats.highlights.max_expense_month {
        insights.push(Insight::PeakSpendingMonth {
            month: peak.month,
            amount: peak.amount,
        });
    }

    tracing::debug!(
        year = stats.year,
        count = insights.len(),
        "Generated insights"
    );
    insights
}
