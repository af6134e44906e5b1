//! Tally Core Library
//!
//! Analytics over personal finance records:
//! - Transaction filtering
//! - Aggregation by category, day, week, month and year
//! - Period-over-period comparison with metric polarity
//! - Rankings and yearly highlights
//! - Derived metrics (savings rate, per-day averages, half-period split)
//! - Rule-based insights
//!
//! Every analytics function is a pure computation over record slices. Only
//! [`source`] and [`config`] touch the filesystem.

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod highlights;
pub mod insights;
pub mod metrics;
pub mod models;
pub mod period;
pub mod source;
pub mod yearly;

pub use aggregate::{
    aggregate_by_category, aggregate_by_day, aggregate_by_month, aggregate_by_period,
    category_totals, data_date_range, heatmap, Granularity, PeriodKey, PeriodTotals,
};
pub use compare::{
    compare_adjacent_period, compare_categories, compare_metric, compare_years, daily_changes,
    previous_period, CategoryComparison, Comparison, DailyChange, Direction, Metric, Polarity,
    YearComparison,
};
pub use config::{AnalyticsConfig, InsightThresholds, Limits};
pub use error::{Error, Result};
pub use filter::{filter_savings, filter_transactions, TransactionFilter, TypeFilter};
pub use highlights::{
    best_savings_month, biggest_transaction, highest_spending_day, max_expense_month,
    recent_transactions, top_shares, top_spending_days, top_transactions, SpendingDay,
};
pub use insights::{generate_insights, Insight, Severity};
pub use metrics::{
    average_per_transaction, avg_per_day, dashboard_stats, half_split, key_metrics, saving_stats,
    savings_rate, HalfSplit, KeyMetrics,
};
pub use models::{
    AverageValue, CategoryAmount, CategoryBreakdown, CategoryShare, DailyStats, DashboardStats,
    DayAmount, Highlights, MonthAmount, MonthlyData, SavingStats, SavingTransaction, SavingType,
    Transaction, TransactionType, YearlyStats,
};
pub use period::{DateRange, Period};
pub use source::{InMemorySource, JsonSnapshot, RecordSource, Snapshot};
pub use yearly::process_yearly_data;
