//! Analytics configuration
//!
//! Ranking limits and insight thresholds, loaded from TOML.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--config`), if it exists
//! 2. The override in the data dir (~/.local/share/tally/config/analytics.toml)
//! 3. The embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// How many entries the ranked lists keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub top_expense_categories: usize,
    pub top_spending_days: usize,
    pub top_transactions: usize,
    pub recent_transactions: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_expense_categories: 10,
            top_spending_days: 5,
            top_transactions: 3,
            recent_transactions: 5,
        }
    }
}

/// Savings-rate thresholds, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Strictly above this is "excellent"
    pub excellent_savings_rate: f64,
    /// Strictly above this (and not excellent) is "positive"
    pub positive_savings_rate: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            excellent_savings_rate: 20.0,
            positive_savings_rate: 0.0,
        }
    }
}

/// Everything the analytics functions need besides the records
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalyticsConfig {
    pub limits: Limits,
    pub insights: InsightThresholds,
}

impl AnalyticsConfig {
    /// Load configuration, see the module docs for resolution order
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading analytics config");
                return parse_config(&read_config(path)?);
            }
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return parse_config(DEFAULT_CONFIG);
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                tracing::debug!(
                    path = %default_path.display(),
                    "Loading analytics config override"
                );
                return parse_config(&read_config(&default_path)?);
            }
        }

        parse_config(DEFAULT_CONFIG)
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Override location in the user's data dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analytics.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    limits: Option<RawLimits>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawLimits {
    top_expense_categories: Option<usize>,
    top_spending_days: Option<usize>,
    top_transactions: Option<usize>,
    recent_transactions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    excellent_savings_rate: Option<f64>,
    positive_savings_rate: Option<f64>,
}

fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(limits) = raw.limits {
        if let Some(n) = limits.top_expense_categories {
            config.limits.top_expense_categories = n;
        }
        if let Some(n) = limits.top_spending_days {
            config.limits.top_spending_days = n;
        }
        if let Some(n) = limits.top_transactions {
            config.limits.top_transactions = n;
        }
        if let Some(n) = limits.recent_transactions {
            config.limits.recent_transactions = n;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(rate) = insights.excellent_savings_rate {
            config.insights.excellent_savings_rate = rate;
        }
        if let Some(rate) = insights.positive_savings_rate {
            config.insights.positive_savings_rate = rate;
        }
    }

    let thresholds = config.insights;
    let rates = [
        thresholds.excellent_savings_rate,
        thresholds.positive_savings_rate,
    ];
    if rates.iter().any(|rate| !rate.is_finite()) {
        return Err(Error::Config(
            "savings rate thresholds must be finite numbers".to_string(),
        ));
    }
    if thresholds.positive_savings_rate > thresholds.excellent_savings_rate {
        return Err(Error::Config(format!(
            "positive_savings_rate ({}) must not exceed excellent_savings_rate ({})",
            thresholds.positive_savings_rate, thresholds.excellent_savings_rate
        )));
    }

    Ok(config)
}
