//! Integration tests for tally-core
//!
//! These tests exercise the full load → filter → aggregate → report workflow.

use chrono::NaiveDate;
use tally_core::{
    aggregate_by_category, aggregate_by_day, compare_categories, compare_years, daily_changes,
    filter_transactions, generate_insights, key_metrics, previous_period, process_yearly_data,
    saving_stats, AnalyticsConfig, Comparison, DateRange, Insight, JsonSnapshot, Polarity,
    RecordSource, TransactionFilter, TransactionType, TypeFilter,
};

/// Snapshot spanning two years with a deliberate category tie in March 2024
fn household_snapshot() -> &'static str {
    r#"{
        "transactions": [
            {"id": "1",  "date": "2023-06-01", "amount": 2000, "category": "Salary", "type": "income"},
            {"id": "2",  "date": "2023-06-03", "amount": 500,  "category": "Rent",   "type": "expense"},
            {"id": "3",  "date": "2024-01-01", "amount": 3000, "category": "Salary", "type": "income"},
            {"id": "4",  "date": "2024-01-05T08:30:00", "amount": 100, "category": "Food",
             "description": "Groceries", "type": "expense"},
            {"id": "5",  "date": "2024-01-10", "amount": 50,   "category": "Food",   "type": "expense"},
            {"id": "6",  "date": "2024-02-01", "amount": 3000, "category": "Salary", "type": "income"},
            {"id": "7",  "date": "2024-02-01", "amount": 1200, "category": "Rent",   "type": "expense"},
            {"id": "8",  "date": "2024-02-14", "amount": 80,   "category": "Gifts",  "type": "expense"},
            {"id": "9",  "date": "2024-03-02", "amount": 60,   "category": "Travel", "type": "expense"},
            {"id": "10", "date": "2024-03-09", "amount": 60,   "category": "Food",   "type": "expense"},
            {"id": "11", "date": "2024-03-29T19:00:00", "amount": 40, "category": "Food",
             "description": "Dinner out", "type": "expense"}
        ],
        "savings": [
            {"id": "s1", "date": "2024-01-31", "amount": 1000, "type": "deposit"},
            {"id": "s2", "date": "2024-02-28", "amount": 250,  "type": "withdraw", "note": "Car repair"}
        ]
    }"#
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// =============================================================================
// Yearly Report Tests
// =============================================================================

#[test]
fn test_yearly_report_from_snapshot() {
    let source = JsonSnapshot::from_json(household_snapshot()).expect("Failed to parse snapshot");
    let transactions = source.transactions().unwrap();
    let config = AnalyticsConfig::default();

    let stats = process_yearly_data(&transactions, 2024, &config);

    assert_eq!(stats.total_income, 6000.0);
    assert_eq!(stats.total_expense, 1590.0);
    assert_eq!(stats.net_income, 4410.0);
    assert_eq!(stats.highlights.total_transactions, 9);

    // Rent 1200, Food 250, Gifts 80, Travel 60
    let names: Vec<&str> = stats
        .top_expense_categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["Rent", "Food", "Gifts", "Travel"]);

    let share_sum: f64 = stats
        .top_expense_categories
        .iter()
        .map(|c| c.percentage)
        .sum();
    assert!((share_sum - 100.0).abs() < 1e-9);

    let peak = stats.highlights.max_expense_month.unwrap();
    assert_eq!(peak.month, 2);
    assert_eq!(peak.amount, 1280.0);

    let best = stats.highlights.best_savings_month.unwrap();
    assert_eq!(best.month, 1);
    assert_eq!(best.amount, 2850.0);

    assert_eq!(stats.highlights.biggest_income_tx.unwrap().id, "3");
    assert_eq!(stats.highlights.top_spending_days[0].date, d(2024, 2, 1));
    assert_eq!(stats.heatmap_data.get("2024-02-01"), Some(&1200.0));
    assert!(!stats.heatmap_data.contains_key("2024-01-01"));
}

#[test]
fn test_year_over_year_comparison() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();
    let config = AnalyticsConfig::default();

    let current = process_yearly_data(&transactions, 2024, &config);
    let previous = process_yearly_data(&transactions, 2023, &config);
    let comparison = compare_years(&current, &previous);

    assert_eq!(comparison.income.percent(), Some(200.0));
    assert!(comparison.income.is_favorable());
    assert!(!comparison.expense.is_favorable());

    // No data at all for 2022
    let empty = process_yearly_data(&transactions, 2022, &config);
    let against_empty = compare_years(&previous, &empty);
    assert_eq!(against_empty.income, Comparison::NoPriorData);
    assert_eq!(against_empty.expense, Comparison::NoPriorData);
}

#[test]
fn test_insights_follow_rule_order() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();
    let config = AnalyticsConfig::default();

    let stats = process_yearly_data(&transactions, 2024, &config);
    let insights = generate_insights(&stats, &config.insights);

    assert_eq!(insights.len(), 3);
    assert!(matches!(&insights[0], Insight::LargestCategory { category, .. } if category == "Rent"));
    assert!(matches!(insights[1], Insight::ExcellentSavings { .. }));
    assert!(matches!(insights[2], Insight::PeakSpendingMonth { month: 2, .. }));
}

// =============================================================================
// Dashboard Tests
// =============================================================================

#[test]
fn test_dashboard_month_against_previous_month() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();

    let march = DateRange::month(2024, 3).unwrap();
    let february = previous_period(&march).unwrap();
    assert_eq!(february, DateRange::month(2024, 2).unwrap());

    let expense_in = |range: DateRange| {
        let filter = TransactionFilter::new()
            .date_range(Some(range))
            .kind(TypeFilter::Expense);
        filter_transactions(&transactions, &filter)
    };
    let current = aggregate_by_category(&expense_in(march), Some(TransactionType::Expense));
    let previous = aggregate_by_category(&expense_in(february), Some(TransactionType::Expense));

    // Food 100 beats Travel 60
    let rows = compare_categories(&current, &previous, Polarity::LowerIsBetter);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].previous_amount, 0.0);
    assert_eq!(rows[0].comparison, Comparison::NoPriorData);
}

#[test]
fn test_key_metrics_for_month() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();
    let config = AnalyticsConfig::default();

    let march = DateRange::month(2024, 3).unwrap();
    let metrics = key_metrics(&transactions, march, &config.limits);

    assert_eq!(metrics.transaction_count, 3);
    assert_eq!(metrics.total_expense, 160.0);
    assert_eq!(metrics.halves.first_half, 120.0);
    assert_eq!(metrics.halves.second_half, 40.0);
    assert_eq!(metrics.top_transactions.len(), 3);
    // Mar 2 and Mar 9 tie at 60: the earlier day wins
    assert_eq!(metrics.highest_spending_day.unwrap().date, d(2024, 3, 2));
}

#[test]
fn test_spending_late_in_period() {
    let snapshot = r#"{"transactions": [
        {"id": "a", "date": "2024-01-29T10:00:00", "amount": 30, "category": "Food", "type": "expense"},
        {"id": "b", "date": "2024-01-29T18:00:00", "amount": 70, "category": "Fun", "type": "expense"}
    ]}"#;
    let transactions = JsonSnapshot::from_json(snapshot)
        .unwrap()
        .transactions()
        .unwrap();
    let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 30)).unwrap();

    let metrics = key_metrics(&transactions, range, &AnalyticsConfig::default().limits);
    assert_eq!(metrics.halves.first_half, 0.0);
    assert_eq!(metrics.halves.second_half, 100.0);
    assert_eq!(metrics.average_per_day, 100.0 / 30.0);
}

#[test]
fn test_daily_table_newest_first() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();

    let jan = TransactionFilter::new().date_range(Some(DateRange::month(2024, 1).unwrap()));
    let daily = aggregate_by_day(&filter_transactions(&transactions, &jan));
    let changes = daily_changes(&daily);

    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0].date, d(2024, 1, 10));
    assert_eq!(changes[0].expense_difference, Some(-50.0));
    assert_eq!(changes[2].date, d(2024, 1, 1));
    assert_eq!(changes[2].expense_difference, None);
}

#[test]
fn test_savings_balance() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let stats = saving_stats(&source.savings().unwrap());
    assert_eq!(stats.total_deposit, 1000.0);
    assert_eq!(stats.total_withdraw, 250.0);
    assert_eq!(stats.balance, 750.0);
}

// =============================================================================
// Property Tests
// =============================================================================

#[test]
fn test_category_breakdown_is_idempotent() {
    let source = JsonSnapshot::from_json(household_snapshot()).unwrap();
    let transactions = source.transactions().unwrap();

    let first = aggregate_by_category(&transactions, None);
    let second = aggregate_by_category(&transactions, None);
    assert_eq!(first, second);

    let mut reversed = transactions.clone();
    reversed.reverse();
    let totals: f64 = aggregate_by_category(&reversed, None)
        .iter()
        .map(|c| c.amount)
        .sum();
    let raw: f64 = transactions.iter().map(|t| t.amount).sum();
    assert_eq!(totals, raw);
}

#[test]
fn test_empty_store() {
    let source = JsonSnapshot::from_json("{}").unwrap();
    let transactions = source.transactions().unwrap();
    let config = AnalyticsConfig::default();

    let stats = process_yearly_data(&transactions, 2024, &config);
    assert_eq!(stats.total_income, 0.0);
    assert_eq!(stats.monthly_data.len(), 12);
    assert!(stats.highlights.max_expense_month.is_none());
    assert!(stats.highlights.biggest_expense_tx.is_none());
    assert_eq!(stats.highlights.avg_monthly_income, 0.0);

    let insights = generate_insights(&stats, &config.insights);
    assert_eq!(insights.len(), 1);
}
