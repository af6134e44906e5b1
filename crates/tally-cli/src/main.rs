//! Tally CLI - Personal finance analytics
//!
//! Usage:
//!   tally year --year 2024 --compare     Yearly summary with insights
//!   tally dashboard --period last-month  Period dashboard
//!   tally categories --type expense      Category breakdown
//!   tally trends --granularity weekly    Totals per bucket
//!   tally savings                        Savings balance

mod cli;
mod commands;


use anyhow::Result;
use chrono::Datelike;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let source = commands::load_source(&cli.data)?;
    let today = commands::today();

    match cli.command {
        Commands::Year {
            year,
            compare,
            json,
        } => {
            let year = year.unwrap_or_else(|| today.year());
            commands::cmd_year(&source, &config, year, compare, json)
        }
        Commands::Dashboard {
            period,
            from,
            to,
            json,
        } => {
            let range = commands::resolve_range(&period, from.as_deref(), to.as_deref(), today)?;
            commands::cmd_dashboard(&source, &config, range, json)
        }
        Commands::Categories {
            kind,
            from,
            to,
            category,
            search,
            json,
        } => {
            let range = commands::resolve_custom_range(from.as_deref(), to.as_deref())?;
            commands::cmd_categories(
                &source,
                &kind,
                range,
                category.as_deref(),
                search.as_deref(),
                json,
            )
        }
        Commands::Trends {
            granularity,
            period,
            from,
            to,
            json,
        } => {
            let range = commands::resolve_range(&period, from.as_deref(), to.as_deref(), today)?;
            commands::cmd_trends(&source, &granularity, range, json)
        }
        Commands::Savings { from, to, json } => {
            let range = commands::resolve_custom_range(from.as_deref(), to.as_deref())?;
            commands::cmd_savings(&source, &config, range, json)
        }
    }
}
