//! Savings command

use anyhow::Result;
use serde_json::json;
use tally_core::{filter_savings, saving_stats, AnalyticsConfig, DateRange, RecordSource};

use super::{print_json, truncate};

pub fn cmd_savings(
    source: &dyn RecordSource,
    config: &AnalyticsConfig,
    range: Option<DateRange>,
    json: bool,
) -> Result<()> {
    let mut savings = filter_savings(&source.savings()?, range);
    let stats = saving_stats(&savings);

    // newest first
    savings.sort_by(|a, b| b.date.cmp(&a.date));
    savings.truncate(config.limits.recent_transactions);

    if json {
        return print_json(&json!({
            "range": range,
            "stats": stats,
            "recent": savings,
        }));
    }

    println!();
    println!("🏦 Savings");
    if let Some(range) = range {
        println!("   Period: {}", range);
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Deposits:     {:>12.2}", stats.total_deposit);
    println!("   Withdrawals:  {:>12.2}", stats.total_withdraw);
    println!("   Balance:      {:>12.2}", stats.balance);
    println!("   Movements:    {:>12}", stats.transaction_count);

    if !savings.is_empty() {
        println!();
        println!("   Recent");
        for saving in &savings {
            println!(
                "   {}  {:8} {:>12.2}  {}",
                saving.day(),
                saving.kind.as_str(),
                saving.value(),
                truncate(&saving.note, 30)
            );
        }
    }
    println!();

    Ok(())
}
