//! Yearly report command

use anyhow::Result;
use serde_json::json;
use tally_core::{
    compare_years, generate_insights, process_yearly_data, AnalyticsConfig, RecordSource,
    Severity, YearComparison, YearlyStats,
};

use super::{format_trend, month_name, print_json, truncate};

pub fn cmd_year(
    source: &dyn RecordSource,
    config: &AnalyticsConfig,
    year: i32,
    compare: bool,
    json: bool,
) -> Result<()> {
    let transactions = source.transactions()?;
    let stats = process_yearly_data(&transactions, year, config);
    let insights = generate_insights(&stats, &config.insights);

    let comparison = if compare {
        let previous = process_yearly_data(&transactions, year - 1, config);
        Some(compare_years(&stats, &previous))
    } else {
        None
    };

    if json {
        let insights: Vec<_> = insights
            .iter()
            .map(|i| {
                json!({
                    "insight": i,
                    "severity": i.severity().as_str(),
                    "message": i.to_string(),
                })
            })
            .collect();
        return print_json(&json!({
            "stats": stats,
            "comparison": comparison,
            "insights": insights,
        }));
    }

    print_summary(&stats, comparison.as_ref());
    print_months(&stats);
    print_categories(&stats);
    print_highlights(&stats);

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in &insights {
        let icon = match insight.severity() {
            Severity::Info => "ℹ️ ",
            Severity::Attention => "👀",
            Severity::Warning => "⚠️ ",
        };
        println!("   {} {}", icon, insight);
    }
    println!();

    Ok(())
}

fn print_summary(stats: &YearlyStats, comparison: Option<&YearComparison>) {
    println!();
    println!("📅 Year {}", stats.year);
    println!("   ─────────────────────────────────────────────────────────────");

    let trend = |pick: fn(&YearComparison) -> String| {
        comparison
            .map(|c| format!("  ({} vs {})", pick(c), c.previous_year))
            .unwrap_or_default()
    };

    println!(
        "   Income:        {:>12.2}{}",
        stats.total_income,
        trend(|c| format_trend(&c.income))
    );
    println!(
        "   Expense:       {:>12.2}{}",
        stats.total_expense,
        trend(|c| format_trend(&c.expense))
    );
    println!(
        "   Net:           {:>12.2}{}",
        stats.net_income,
        trend(|c| format_trend(&c.net_income))
    );
    println!(
        "   Savings rate:  {:>11.1}%{}",
        stats.savings_rate,
        trend(|c| format_trend(&c.savings_rate))
    );
}

fn print_months(stats: &YearlyStats) {
    println!();
    println!(
        "   {:10} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expense", "Net"
    );
    println!("   ───────────┼──────────────┼──────────────┼──────────────");
    for month in &stats.monthly_data {
        println!(
            "   {:10} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
            month_name(month.month),
            month.income,
            month.expense,
            month.net
        );
    }
}

fn print_categories(stats: &YearlyStats) {
    if !stats.top_expense_categories.is_empty() {
        println!();
        println!("   Top expense categories");
        for share in &stats.top_expense_categories {
            println!(
                "   {:25} {:>12.2} {:>6.1}%",
                truncate(&share.category, 25),
                share.amount,
                share.percentage
            );
        }
    }

    if !stats.top_income_sources.is_empty() {
        println!();
        println!("   Income sources");
        for share in &stats.top_income_sources {
            println!(
                "   {:25} {:>12.2} {:>6.1}%",
                truncate(&share.category, 25),
                share.amount,
                share.percentage
            );
        }
    }
}

fn print_highlights(stats: &YearlyStats) {
    let h = &stats.highlights;

    println!();
    println!("⭐ Highlights");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions:          {}", h.total_transactions);
    println!("   Avg monthly income:    {:.2}", h.avg_monthly_income);
    println!("   Avg monthly expense:   {:.2}", h.avg_monthly_expense);
    println!(
        "   Avg transaction:       income {:.2} / expense {:.2}",
        h.avg_transaction_value.income, h.avg_transaction_value.expense
    );
    if let Some(m) = h.max_expense_month {
        println!(
            "   Peak spending month:   {} ({:.2})",
            month_name(m.month),
            m.amount
        );
    }
    if let Some(m) = h.best_savings_month {
        println!(
            "   Best savings month:    {} ({:.2})",
            month_name(m.month),
            m.amount
        );
    }
    if let Some(tx) = &h.biggest_expense_tx {
        println!(
            "   Biggest expense:       {:.2} {} on {}",
            tx.value(),
            tx.category,
            tx.day()
        );
    }
    if let Some(tx) = &h.biggest_income_tx {
        println!(
            "   Biggest income:        {:.2} {} on {}",
            tx.value(),
            tx.category,
            tx.day()
        );
    }
    if !h.top_spending_days.is_empty() {
        println!("   Top spending days:");
        for day in &h.top_spending_days {
            println!("     {}  {:>12.2}", day.date, day.amount);
        }
    }
}
