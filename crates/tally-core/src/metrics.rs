//! Derived metrics: rates, averages and the dashboard metric card

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::filter::{filter_transactions, TransactionFilter};
use crate::highlights::{highest_spending_day, top_transactions, SpendingDay};
use crate::models::{
    DashboardStats, SavingStats, SavingTransaction, SavingType, Transaction, TransactionType,
};
use crate::period::DateRange;

/// `(income - expense) / income * 100`, 0 when there is no income
pub fn savings_rate(income: f64, expense: f64) -> f64 {
    if income > 0.0 {
        (income - expense) / income * 100.0
    } else {
        0.0
    }
}

/// Expense per day of the period, 0 for an empty period
pub fn avg_per_day(total_expense: f64, days_in_period: u32) -> f64 {
    if days_in_period > 0 {
        total_expense / days_in_period as f64
    } else {
        0.0
    }
}

/// `total / count`, 0 when count is 0
pub fn average_per_transaction(total: f64, count: usize) -> f64 {
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// Income, expense and balance over all records
pub fn dashboard_stats(records: &[Transaction]) -> DashboardStats {
    let mut stats = DashboardStats {
        transaction_count: records.len(),
        ..DashboardStats::default()
    };
    for tx in records {
        match tx.kind {
            TransactionType::Income => stats.total_income += tx.value(),
            TransactionType::Expense => stats.total_expense += tx.value(),
        }
    }
    stats.balance = stats.total_income - stats.total_expense;
    stats
}

/// Deposits, withdrawals and the resulting savings balance
pub fn saving_stats(records: &[SavingTransaction]) -> SavingStats {
    let mut stats = SavingStats {
        transaction_count: records.len(),
        ..SavingStats::default()
    };
    for saving in records {
        match saving.kind {
            SavingType::Deposit => stats.total_deposit += saving.value(),
            SavingType::Withdraw => stats.total_withdraw += saving.value(),
        }
    }
    stats.balance = stats.total_deposit - stats.total_withdraw;
    stats
}

/// Expense before and after the middle of a range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HalfSplit {
    pub first_half: f64,
    pub second_half: f64,
}

/// Split expense at [`DateRange::midpoint`]
///
/// Records strictly before the midpoint count toward the first half, the
/// rest toward the second. Records outside `range` are not excluded.
pub fn half_split(records: &[Transaction], range: &DateRange) -> HalfSplit {
    let midpoint = range.midpoint();
    let mut split = HalfSplit::default();
    for tx in records.iter().filter(|t| t.is_expense()) {
        if tx.date < midpoint {
            split.first_half += tx.value();
        } else {
            split.second_half += tx.value();
        }
    }
    split
}

/// The dashboard metric card for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub range: DateRange,
    /// All records in the range, income included
    pub transaction_count: usize,
    pub expense_count: usize,
    pub total_expense: f64,
    /// Expense total / expense count
    pub average_per_transaction: f64,
    pub average_per_day: f64,
    pub halves: HalfSplit,
    pub highest_spending_day: Option<SpendingDay>,
    pub top_transactions: Vec<Transaction>,
}

/// Compute the metric card for the records that fall inside `range`
pub fn key_metrics(records: &[Transaction], range: DateRange, limits: &Limits) -> KeyMetrics {
    let in_range = filter_transactions(records, &TransactionFilter::new().date_range(Some(range)));

    let stats = dashboard_stats(&in_range);
    let expense_count = in_range.iter().filter(|t| t.is_expense()).count();

    let metrics = KeyMetrics {
        range,
        transaction_count: in_range.len(),
        expense_count,
        total_expense: stats.total_expense,
        average_per_transaction: average_per_transaction(stats.total_expense, expense_count),
        average_per_day: avg_per_day(stats.total_expense, range.days()),
        halves: half_split(&in_range, &range),
        highest_spending_day: highest_spending_day(&in_range),
        top_transactions: top_transactions(
            &in_range,
            TransactionType::Expense,
            limits.top_transactions,
        ),
    };

    tracing::debug!(
        range = %range,
        transactions = metrics.transaction_count,
        total_expense = metrics.total_expense,
        "Computed key metrics"
    );
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_record_date;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tx(id: &str, date: &str, amount: f64, kind: TransactionType) -> Transaction {
        Transaction::new(id, parse_record_date(date).unwrap(), amount, "Misc", kind)
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(1000.0, 150.0), 85.0);
        assert_eq!(savings_rate(100.0, 150.0), -50.0);
        assert_eq!(savings_rate(0.0, 150.0), 0.0);
    }

    #[test]
    fn test_averages_guard_zero() {
        assert_eq!(avg_per_day(300.0, 30), 10.0);
        assert_eq!(avg_per_day(300.0, 0), 0.0);
        assert_eq!(average_per_transaction(90.0, 3), 30.0);
        assert_eq!(average_per_transaction(90.0, 0), 0.0);
    }

    #[test]
    fn test_dashboard_stats() {
        let records = vec![
            tx("1", "2024-01-01", 1000.0, TransactionType::Income),
            tx("2", "2024-01-02", 300.0, TransactionType::Expense),
            tx("3", "2024-01-03", 200.0, TransactionType::Expense),
        ];
        let stats = dashboard_stats(&records);
        assert_eq!(stats.total_income, 1000.0);
        assert_eq!(stats.total_expense, 500.0);
        assert_eq!(stats.balance, 500.0);
        assert_eq!(stats.transaction_count, 3);

        assert_eq!(dashboard_stats(&[]), DashboardStats::default());
    }

    #[test]
    fn test_saving_stats() {
        let date = parse_record_date("2024-01-01").unwrap();
        let records = vec![
            SavingTransaction::new("s1", date, 500.0, SavingType::Deposit),
            SavingTransaction::new("s2", date, 200.0, SavingType::Deposit),
            SavingTransaction::new("s3", date, 100.0, SavingType::Withdraw),
        ];
        let stats = saving_stats(&records);
        assert_eq!(stats.total_deposit, 700.0);
        assert_eq!(stats.total_withdraw, 100.0);
        assert_eq!(stats.balance, 600.0);
        assert_eq!(stats.transaction_count, 3);
    }

    #[test]
    fn test_half_split_late_spending() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 30)).unwrap();
        let records = vec![
            tx("a", "2024-01-29T09:00:00", 40.0, TransactionType::Expense),
            tx("b", "2024-01-29T21:00:00", 60.0, TransactionType::Expense),
            tx("c", "2024-01-02", 999.0, TransactionType::Income),
        ];
        let split = half_split(&records, &range);
        assert_eq!(split.first_half, 0.0);
        assert_eq!(split.second_half, 100.0);
    }

    #[test]
    fn test_half_split_boundary_goes_to_second_half() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        let mid = range.midpoint();
        let at_mid = Transaction::new("m", mid, 10.0, "Misc", TransactionType::Expense);
        let split = half_split(&[at_mid], &range);
        assert_eq!(split.first_half, 0.0);
        assert_eq!(split.second_half, 10.0);
    }

    #[test]
    fn test_key_metrics() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 10)).unwrap();
        let records = vec![
            tx("1", "2024-01-02", 20.0, TransactionType::Expense),
            tx("2", "2024-01-02", 30.0, TransactionType::Expense),
            tx("3", "2024-01-08", 50.0, TransactionType::Expense),
            tx("4", "2024-01-05", 500.0, TransactionType::Income),
            tx("5", "2024-02-01", 999.0, TransactionType::Expense),
        ];
        let limits = Limits {
            top_transactions: 2,
            ..Limits::default()
        };

        let metrics = key_metrics(&records, range, &limits);
        assert_eq!(metrics.transaction_count, 4);
        assert_eq!(metrics.expense_count, 3);
        assert_eq!(metrics.total_expense, 100.0);
        assert_eq!(metrics.average_per_day, 10.0);
        assert_eq!(metrics.halves.first_half, 50.0);
        assert_eq!(metrics.halves.second_half, 50.0);

        let top: Vec<&str> = metrics
            .top_transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(top, vec!["3", "2"]);

        // Jan 2 and Jan 8 both total 50: the earlier day wins
        let day = metrics.highest_spending_day.unwrap();
        assert_eq!(day.date, d(2024, 1, 2));
        assert_eq!(day.transaction_count, 2);
        assert_eq!(day.largest_transaction.id, "2");
    }
}
