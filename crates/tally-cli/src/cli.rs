//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - See where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance analytics over a Tally data export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data file (JSON export with "transactions" and "savings")
    #[arg(long, default_value = "tally.json", global = true)]
    pub data: PathBuf,

    /// Analytics config file (defaults to the data-dir override, then built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Yearly summary with highlights and insights
    Year {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Compare against the previous year
        #[arg(long)]
        compare: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dashboard for a period, compared with the month before
    Dashboard {
        /// Time period: this-month, last-month, this-year, last-year, last-30-days, last-90-days
        #[arg(long, default_value = "this-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Category breakdown of filtered transactions
    Categories {
        /// Transaction type: income, expense, all
        #[arg(long = "type", default_value = "expense")]
        kind: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only this exact category
        #[arg(long)]
        category: Option<String>,

        /// Search description and category (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income and expense per day, week or month
    Trends {
        /// Granularity: daily, weekly, monthly
        #[arg(long, default_value = "monthly")]
        granularity: String,

        /// Time period (ignored when --from/--to are given)
        #[arg(long, default_value = "this-year")]
        period: String,

        /// Custom start date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Savings balance and recent movements
    Savings {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
