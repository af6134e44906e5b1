//! Dashboard command

use anyhow::Result;
use serde_json::json;
use tally_core::{
    aggregate_by_category, aggregate_by_day, compare_categories, compare_metric, daily_changes,
    dashboard_stats, filter_transactions, key_metrics, previous_period, recent_transactions,
    AnalyticsConfig, CategoryComparison, DashboardStats, DateRange, Metric, Polarity,
    RecordSource, Transaction, TransactionFilter, TransactionType,
};

use super::{format_trend, print_json, truncate};

/// Records inside `range`; none when there is no range to compare with
fn in_range(records: &[Transaction], range: Option<DateRange>) -> Vec<Transaction> {
    match range {
        Some(_) => filter_transactions(records, &TransactionFilter::new().date_range(range)),
        None => Vec::new(),
    }
}

pub fn cmd_dashboard(
    source: &dyn RecordSource,
    config: &AnalyticsConfig,
    range: DateRange,
    json: bool,
) -> Result<()> {
    let all = source.transactions()?;
    let previous_range = previous_period(&range);

    let current = in_range(&all, Some(range));
    let previous = in_range(&all, previous_range);

    let stats = dashboard_stats(&current);
    let previous_stats = dashboard_stats(&previous);

    let income_trend = compare_metric(
        Metric::Income,
        stats.total_income,
        previous_stats.total_income,
    );
    let expense_trend = compare_metric(
        Metric::Expense,
        stats.total_expense,
        previous_stats.total_expense,
    );
    let balance_trend = compare_metric(Metric::Balance, stats.balance, previous_stats.balance);

    let expense_categories = compare_categories(
        &aggregate_by_category(&current, Some(TransactionType::Expense)),
        &aggregate_by_category(&previous, Some(TransactionType::Expense)),
        Polarity::LowerIsBetter,
    );
    let income_categories = compare_categories(
        &aggregate_by_category(&current, Some(TransactionType::Income)),
        &aggregate_by_category(&previous, Some(TransactionType::Income)),
        Polarity::HigherIsBetter,
    );

    let metrics = key_metrics(&current, range, &config.limits);
    let daily = daily_changes(&aggregate_by_day(&current));
    let recent = recent_transactions(&current, config.limits.recent_transactions);

    if json {
        return print_json(&json!({
            "range": range,
            "previous_range": previous_range,
            "stats": stats,
            "previous_stats": previous_stats,
            "trends": {
                "income": income_trend,
                "expense": expense_trend,
                "balance": balance_trend,
            },
            "expense_categories": expense_categories,
            "income_categories": income_categories,
            "key_metrics": metrics,
            "daily": daily,
            "recent": recent,
        }));
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!("   Period: {}", range);
    if let Some(prev) = previous_range {
        println!("   Compared with: {}", prev);
    }
    println!();
    let trends = [
        format_trend(&income_trend),
        format_trend(&expense_trend),
        format_trend(&balance_trend),
    ];
    print_stats(&stats, trends);

    println!();
    println!("📈 Key metrics");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions:     {}", metrics.transaction_count);
    println!("   Avg per expense:  {:.2}", metrics.average_per_transaction);
    println!("   Avg per day:      {:.2}", metrics.average_per_day);
    println!(
        "   First half:       {:.2}   Second half: {:.2}",
        metrics.halves.first_half, metrics.halves.second_half
    );
    if let Some(day) = &metrics.highest_spending_day {
        println!(
            "   Highest day:      {} ({:.2} over {} transactions, largest {:.2} {})",
            day.date,
            day.total,
            day.transaction_count,
            day.largest_transaction.value(),
            day.largest_transaction.category
        );
    }
    for (i, tx) in metrics.top_transactions.iter().enumerate() {
        println!(
            "   #{} {:>12.2}  {}  {}",
            i + 1,
            tx.value(),
            tx.day(),
            truncate(display_label(tx), 30)
        );
    }

    print_category_table("Expense by category", &expense_categories);
    print_category_table("Income by category", &income_categories);

    if !daily.is_empty() {
        println!();
        println!("🗓️  Daily");
        println!(
            "   {:10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
            "Date", "Income", "Expense", "Change", "Avg"
        );
        println!("   ───────────┼────────────┼────────────┼────────────┼────────────");
        for day in &daily {
            let change = day
                .expense_difference
                .map(|d| format!("{:+.2}", d))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "   {:10} │ {:>10.2} │ {:>10.2} │ {:>10} │ {:>10.2}",
                day.date.to_string(),
                day.income,
                day.expense,
                change,
                day.average_value
            );
        }
    }

    if !recent.is_empty() {
        println!();
        println!("🕒 Recent");
        for tx in &recent {
            println!(
                "   {}  {:>12}  {}",
                tx.date.format("%Y-%m-%d %H:%M"),
                signed_amount(tx),
                truncate(display_label(tx), 30)
            );
        }
    }
    println!();

    Ok(())
}

/// Coerced amount with a leading `+` for income and `-` for expense
pub fn signed_amount(tx: &Transaction) -> String {
    let sign = if tx.is_income() { "+" } else { "-" };
    format!("{}{:.2}", sign, tx.value())
}

fn display_label(tx: &Transaction) -> &str {
    if tx.description.is_empty() {
        tx.category.as_str()
    } else {
        tx.description.as_str()
    }
}

fn print_stats(stats: &DashboardStats, trends: [String; 3]) {
    let [income, expense, balance] = trends;
    println!("   Income:   {:>12.2}  {}", stats.total_income, income);
    println!("   Expense:  {:>12.2}  {}", stats.total_expense, expense);
    println!("   Balance:  {:>12.2}  {}", stats.balance, balance);
}

fn print_category_table(title: &str, rows: &[CategoryComparison]) {
    if rows.is_empty() {
        return;
    }
    println!();
    println!("   {}", title);
    println!(
        "   {:25} │ {:>12} │ {:>12} │ {:>12}",
        "Category", "Amount", "Previous", "Trend"
    );
    println!("   ──────────────────────────┼──────────────┼──────────────┼──────────────");
    for row in rows {
        println!(
            "   {:25} │ {:>12.2} │ {:>12.2} │ {:>12}",
            truncate(&row.category, 25),
            row.amount,
            row.previous_amount,
            format_trend(&row.comparison)
        );
    }
}
