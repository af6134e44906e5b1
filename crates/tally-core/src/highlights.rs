//! Rankings and superlatives
//!
//! All rankings are stable: when two entries compare equal the one that came
//! first (earliest month, earliest day, first record in input order) wins.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::daily_expense_totals;
use crate::models::{
    CategoryAmount, CategoryShare, DayAmount, MonthAmount, MonthlyData, Transaction,
    TransactionType,
};

/// Attach a percentage of `group_total` to each category
///
/// `limit` keeps only the first n entries; the percentage still refers to
/// the whole group. A zero total gives 0% everywhere.
pub fn top_shares(
    breakdown: &[CategoryAmount],
    group_total: f64,
    limit: Option<usize>,
) -> Vec<CategoryShare> {
    let limit = limit.unwrap_or(breakdown.len());
    breakdown
        .iter()
        .take(limit)
        .map(|c| CategoryShare {
            category: c.category.clone(),
            amount: c.amount,
            percentage: percentage(c.amount, group_total),
        })
        .collect()
}

pub(crate) fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Month with the highest expense, `None` when every month is zero
pub fn max_expense_month(monthly: &[MonthlyData]) -> Option<MonthAmount> {
    best_month(monthly, |m| m.expense)
}

/// Month with the highest positive net, `None` when no month saved money
pub fn best_savings_month(monthly: &[MonthlyData]) -> Option<MonthAmount> {
    best_month(monthly, |m| m.net)
}

fn best_month(
    monthly: &[MonthlyData],
    value: impl Fn(&MonthlyData) -> f64,
) -> Option<MonthAmount> {
    let mut best: Option<MonthAmount> = None;
    for month in monthly {
        let amount = value(month);
        if amount <= 0.0 {
            continue;
        }
        if best.map_or(true, |b| amount > b.amount) {
            best = Some(MonthAmount {
                month: month.month,
                amount,
            });
        }
    }
    best
}

/// Largest transaction of a type; the first one wins a tie
pub fn biggest_transaction(records: &[Transaction], kind: TransactionType) -> Option<Transaction> {
    let mut biggest: Option<(&Transaction, f64)> = None;
    for tx in records.iter().filter(|t| t.kind == kind) {
        let amount = tx.value();
        if biggest.map_or(true, |(_, best)| amount > best) {
            biggest = Some((tx, amount));
        }
    }
    biggest.map(|(tx, _)| tx.clone())
}

/// The `n` days with the highest expense total, descending
pub fn top_spending_days(records: &[Transaction], n: usize) -> Vec<DayAmount> {
    let mut days: Vec<DayAmount> = daily_expense_totals(records)
        .into_iter()
        .map(|(date, amount)| DayAmount { date, amount })
        .collect();

    // days come out of the map ascending, so ties keep the earlier day first
    days.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    days.truncate(n);
    days
}

/// The `n` largest transactions of a type, descending
pub fn top_transactions(
    records: &[Transaction],
    kind: TransactionType,
    n: usize,
) -> Vec<Transaction> {
    let mut matching: Vec<(&Transaction, f64)> = records
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| (t, t.value()))
        .collect();
    matching.sort_by(|a, b| b.1.total_cmp(&a.1));
    matching
        .into_iter()
        .take(n)
        .map(|(tx, _)| tx.clone())
        .collect()
}

/// The `n` most recent transactions, newest first
pub fn recent_transactions(records: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(n).cloned().collect()
}

/// The day with the most spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingDay {
    pub date: NaiveDate,
    pub total: f64,
    /// Expense records on that day
    pub transaction_count: usize,
    pub largest_transaction: Transaction,
}

/// Day with the largest expense total, `None` without expenses
///
/// Ties go to the earliest day.
pub fn highest_spending_day(records: &[Transaction]) -> Option<SpendingDay> {
    let mut by_day: BTreeMap<NaiveDate, Vec<(&Transaction, f64)>> = BTreeMap::new();
    for tx in records.iter().filter(|t| t.is_expense()) {
        by_day.entry(tx.day()).or_default().push((tx, tx.value()));
    }

    let mut highest: Option<(NaiveDate, f64, &Vec<(&Transaction, f64)>)> = None;
    for (date, txs) in &by_day {
        let total: f64 = txs.iter().map(|&(_, amount)| amount).sum();
        if highest.map_or(true, |(_, best, _)| total > best) {
            highest = Some((*date, total, txs));
        }
    }

    let (date, total, txs) = highest?;
    let (mut largest, mut largest_amount) = txs[0];
    for &(tx, amount) in txs.iter().skip(1) {
        if amount > largest_amount {
            largest = tx;
            largest_amount = amount;
        }
    }

    Some(SpendingDay {
        date,
        total,
        transaction_count: txs.len(),
        largest_transaction: largest.clone(),
    })
}
