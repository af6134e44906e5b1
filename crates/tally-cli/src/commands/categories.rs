//! Category breakdown command

use anyhow::{Context, Result};
use serde_json::json;
use tally_core::{
    aggregate_by_category, filter_transactions, top_shares, DateRange, RecordSource,
    TransactionFilter, TypeFilter,
};

use super::{print_json, truncate};

pub fn cmd_categories(
    source: &dyn RecordSource,
    kind: &str,
    range: Option<DateRange>,
    category: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let type_filter: TypeFilter = kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Invalid --type")?;

    let filter = TransactionFilter::new()
        .date_range(range)
        .kind(type_filter)
        .category(category)
        .search(search);

    let transactions = source.transactions()?;
    let matched = filter_transactions(&transactions, &filter);

    let breakdown = aggregate_by_category(&matched, type_filter.transaction_type());
    let total: f64 = breakdown.iter().map(|c| c.amount).sum();
    let shares = top_shares(&breakdown, total, None);

    if json {
        return print_json(&json!({
            "type": type_filter.as_str(),
            "range": range,
            "total": total,
            "transaction_count": matched.len(),
            "categories": shares,
        }));
    }

    println!();
    println!("📊 Categories ({})", type_filter);
    if let Some(range) = range {
        println!("   Period: {}", range);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if shares.is_empty() {
        println!("   No transactions match these filters.");
        return Ok(());
    }

    println!("   Total: {:.2} over {} transactions", total, matched.len());
    println!();
    println!("   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼──────────────┼────────");
    for share in &shares {
        println!(
            "   {:25} │ {:>12.2} │ {:>5.1}%",
            truncate(&share.category, 25),
            share.amount,
            share.percentage
        );
    }
    println!();

    Ok(())
}
