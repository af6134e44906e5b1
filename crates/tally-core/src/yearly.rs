//! Yearly summary
//!
//! [`process_yearly_data`] builds the full report for one calendar year:
//! totals, the twelve month series, category breakdowns with shares,
//! highlights and the expense heatmap.

use chrono::Datelike;

use crate::aggregate::{aggregate_by_category, aggregate_by_month, category_totals, heatmap};
use crate::config::AnalyticsConfig;
use crate::highlights::{
    best_savings_month, biggest_transaction, max_expense_month, top_shares, top_spending_days,
};
use crate::metrics::{average_per_transaction, savings_rate};
use crate::models::{AverageValue, Highlights, Transaction, TransactionType, YearlyStats};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Summarize the records dated in `year`
///
/// Records from other years are ignored, so the full history can be passed
/// in. An empty year yields zeros, twelve empty months and no highlights.
pub fn process_yearly_data(
    records: &[Transaction],
    year: i32,
    config: &AnalyticsConfig,
) -> YearlyStats {
    let working: Vec<Transaction> = records
        .iter()
        .filter(|t| t.day().year() == year)
        .cloned()
        .collect();

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut income_count = 0usize;
    let mut expense_count = 0usize;
    for tx in &working {
        match tx.kind {
            TransactionType::Income => {
                total_income += tx.value();
                income_count += 1;
            }
            TransactionType::Expense => {
                total_expense += tx.value();
                expense_count += 1;
            }
        }
    }

    let monthly_data = aggregate_by_month(&working, year);

    let expense_breakdown = aggregate_by_category(&working, Some(TransactionType::Expense));
    let income_breakdown = aggregate_by_category(&working, Some(TransactionType::Income));

    let highlights = Highlights {
        max_expense_month: max_expense_month(&monthly_data),
        best_savings_month: best_savings_month(&monthly_data),
        avg_monthly_income: total_income / MONTHS_PER_YEAR,
        avg_monthly_expense: total_expense / MONTHS_PER_YEAR,
        biggest_expense_tx: biggest_transaction(&working, TransactionType::Expense),
        biggest_income_tx: biggest_transaction(&working, TransactionType::Income),
        total_transactions: working.len(),
        avg_transaction_value: AverageValue {
            income: average_per_transaction(total_income, income_count),
            expense: average_per_transaction(total_expense, expense_count),
        },
        top_spending_days: top_spending_days(&working, config.limits.top_spending_days),
    };

    let stats = YearlyStats {
        year,
        total_income,
        total_expense,
        net_income: total_income - total_expense,
        savings_rate: savings_rate(total_income, total_expense),
        category_expense: category_totals(&working, TransactionType::Expense),
        category_income: category_totals(&working, TransactionType::Income),
        top_expense_categories: top_shares(
            &expense_breakdown,
            total_expense,
            Some(config.limits.top_expense_categories),
        ),
        top_income_sources: top_shares(&income_breakdown, total_income, None),
        highlights,
        heatmap_data: heatmap(&working, year),
        monthly_data,
    };

    tracing::debug!(
        year,
        records = working.len(),
        total_income = stats.total_income,
        total_expense = stats.total_expense,
        "Processed yearly data"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_record_date, MonthAmount};

    fn tx(id: &str, date: &str, amount: f64, category: &str, kind: TransactionType) -> Transaction {
        Transaction::new(id, parse_record_date(date).unwrap(), amount, category, kind)
    }

    #[test]
    fn test_small_year() {
        let records = vec![
            tx("1", "2024-01-05", 100.0, "Food", TransactionType::Expense),
            tx("2", "2024-01-10", 50.0, "Food", TransactionType::Expense),
            tx("3", "2024-01-01", 1000.0, "Salary", TransactionType::Income),
        ];
        let stats = process_yearly_data(&records, 2024, &AnalyticsConfig::default());

        assert_eq!(stats.total_expense, 150.0);
        assert_eq!(stats.total_income, 1000.0);
        assert_eq!(stats.net_income, 850.0);
        assert_eq!(stats.savings_rate, 85.0);

        assert_eq!(stats.top_expense_categories.len(), 1);
        assert_eq!(stats.top_expense_categories[0].category, "Food");
        assert_eq!(stats.top_expense_categories[0].amount, 150.0);
        assert_eq!(stats.top_expense_categories[0].percentage, 100.0);

        assert_eq!(stats.monthly_data.len(), 12);
        assert_eq!(stats.monthly_data[0].net, 850.0);
        assert_eq!(
            stats.highlights.max_expense_month,
            Some(MonthAmount {
                month: 1,
                amount: 150.0
            })
        );
        assert_eq!(stats.highlights.total_transactions, 3);
        assert_eq!(stats.highlights.avg_transaction_value.expense, 75.0);
        assert_eq!(
            stats.highlights.biggest_expense_tx.as_ref().map(|t| t.id.as_str()),
            Some("1")
        );
        assert_eq!(stats.heatmap_data.len(), 2);
        assert_eq!(stats.heatmap_data.get("2024-01-05"), Some(&100.0));
    }

    #[test]
    fn test_empty_year() {
        let stats = process_yearly_data(&[], 2024, &AnalyticsConfig::default());

        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_expense, 0.0);
        assert_eq!(stats.savings_rate, 0.0);
        assert_eq!(stats.monthly_data.len(), 12);
        assert!(stats
            .monthly_data
            .iter()
            .all(|m| m.income == 0.0 && m.expense == 0.0 && m.net == 0.0));
        assert!(stats.highlights.max_expense_month.is_none());
        assert!(stats.highlights.best_savings_month.is_none());
        assert!(stats.highlights.biggest_expense_tx.is_none());
        assert!(stats.highlights.biggest_income_tx.is_none());
        assert_eq!(stats.highlights.avg_monthly_income, 0.0);
        assert!(stats.highlights.top_spending_days.is_empty());
        assert!(stats.top_expense_categories.is_empty());
        assert!(stats.heatmap_data.is_empty());
    }

    #[test]
    fn test_other_years_are_ignored() {
        let records = vec![
            tx("1", "2023-12-31T23:59:59", 500.0, "Food", TransactionType::Expense),
            tx("2", "2024-03-01", 40.0, "Food", TransactionType::Expense),
        ];
        let stats = process_yearly_data(&records, 2024, &AnalyticsConfig::default());
        assert_eq!(stats.total_expense, 40.0);
        assert_eq!(stats.highlights.total_transactions, 1);
        assert_eq!(stats.monthly_data[2].expense, 40.0);
    }

    #[test]
    fn test_category_limit_from_config() {
        let records: Vec<Transaction> = (0..12)
            .map(|i| {
                tx(
                    &i.to_string(),
                    "2024-06-01",
                    (i + 1) as f64,
                    &format!("Cat{}", i),
                    TransactionType::Expense,
                )
            })
            .collect();
        let stats = process_yearly_data(&records, 2024, &AnalyticsConfig::default());

        assert_eq!(stats.top_expense_categories.len(), 10);
        assert_eq!(stats.top_expense_categories[0].category, "Cat11");
        assert_eq!(stats.category_expense.len(), 12);

        let mut config = AnalyticsConfig::default();
        config.limits.top_expense_categories = 3;
        let stats = process_yearly_data(&records, 2024, &config);
        assert_eq!(stats.top_expense_categories.len(), 3);
    }

    #[test]
    fn test_average_monthly_divides_by_twelve() {
        let records = vec![tx("1", "2024-02-01", 1200.0, "Salary", TransactionType::Income)];
        let stats = process_yearly_data(&records, 2024, &AnalyticsConfig::default());
        assert_eq!(stats.highlights.avg_monthly_income, 100.0);
    }
}
