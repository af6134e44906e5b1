//! CLI command implementations
//!
//! Commands are organized by report:
//! - `year` - Yearly summary, highlights, insights, year-over-year comparison
//! - `dashboard` - Period dashboard compared with the previous month
//! - `categories` - Category breakdown of filtered transactions
//! - `trends` - Totals per day, week or month
//! - `savings` - Savings balance and movements
//!
//! Shared helpers (loading data and config, period resolution, output
//! formatting) live here.

pub mod categories;
pub mod dashboard;
pub mod savings;
pub mod trends;
pub mod year;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::period::parse_date;
use tally_core::{AnalyticsConfig, Comparison, DateRange, Direction, JsonSnapshot, Period};

// Re-export command functions for main.rs
pub use categories::*;
pub use dashboard::*;
pub use savings::*;
pub use trends::*;
pub use year::*;

/// Open the JSON data export
pub fn load_source(path: &Path) -> Result<JsonSnapshot> {
    JsonSnapshot::open(path)
        .with_context(|| format!("Failed to load data from {}", path.display()))
}

/// Load analytics config (explicit path, data-dir override, built-in)
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

/// Today in local time; record dates are local wall-clock too
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve `--from`/`--to` into a range; both or neither must be given
pub fn resolve_custom_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) => {
            let start = parse_date(from).context("Invalid --from date")?;
            let end = parse_date(to).context("Invalid --to date")?;
            Ok(Some(DateRange::new(start, end)?))
        }
        _ => anyhow::bail!("--from and --to must be given together"),
    }
}

/// Resolve a period name, unless custom dates override it
pub fn resolve_range(
    period: &str,
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange> {
    if let Some(range) = resolve_custom_range(from, to)? {
        return Ok(range);
    }
    let period: Period = period.parse()?;
    Ok(period.resolve(today))
}

/// Pretty-print a JSON value to stdout
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a comparison as a short trend marker, e.g. "▲ 12.5% ✓"
pub fn format_trend(comparison: &Comparison) -> String {
    match comparison {
        Comparison::NoPriorData => "n/a".to_string(),
        Comparison::Change {
            percent,
            direction,
            favorable,
        } => {
            let arrow = match direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Flat => "=",
            };
            let mark = if *favorable { " ✓" } else { "" };
            format!("{} {:.1}%{}", arrow, percent.abs(), mark)
        }
    }
}

/// Full English month name for 1-12
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map_or("?", |m| m.name())
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
