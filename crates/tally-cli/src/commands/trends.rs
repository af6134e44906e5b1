//! Trends command: totals per day, week or month

use anyhow::{Context, Result};
use serde_json::json;
use tally_core::{
    aggregate_by_period, filter_transactions, DateRange, Granularity, RecordSource,
    TransactionFilter,
};

use super::print_json;

pub fn cmd_trends(
    source: &dyn RecordSource,
    granularity: &str,
    range: DateRange,
    json: bool,
) -> Result<()> {
    let granularity: Granularity = granularity
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Invalid --granularity")?;

    let transactions = source.transactions()?;
    let filter = TransactionFilter::new().date_range(Some(range));
    let buckets = aggregate_by_period(&filter_transactions(&transactions, &filter), granularity);

    if json {
        let rows: Vec<_> = buckets
            .iter()
            .map(|b| {
                json!({
                    "label": b.key.to_string(),
                    "key": b.key,
                    "income": b.income,
                    "expense": b.expense,
                    "net": b.income - b.expense,
                    "count": b.count,
                })
            })
            .collect();
        return print_json(&json!({
            "granularity": granularity.as_str(),
            "range": range,
            "periods": rows,
        }));
    }

    println!();
    println!("📈 Trends ({})", granularity.as_str());
    println!("   Period: {}", range);
    println!("   ─────────────────────────────────────────────────────────────");

    if buckets.is_empty() {
        println!("   No transactions in this period.");
        return Ok(());
    }

    println!(
        "   {:18} │ {:>12} │ {:>12} │ {:>12} │ {:>5}",
        "Period", "Income", "Expense", "Net", "Count"
    );
    println!("   ───────────────────┼──────────────┼──────────────┼──────────────┼───────");
    for bucket in &buckets {
        println!(
            "   {:18} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>5}",
            bucket.key.to_string(),
            bucket.income,
            bucket.expense,
            bucket.income - bucket.expense,
            bucket.count
        );
    }
    println!();

    Ok(())
}
