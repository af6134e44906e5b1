//! Date ranges and period presets
//!
//! All ranges are inclusive on both ends and work on local calendar days.
//! Instants used for midpoint arithmetic run from the first second of the
//! start day to the last second of the end day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidPeriod(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year-month`
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidPeriod(format!("no such month {}-{:02}", year, month)))?;
        let end = last_day_of_month(start);
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: date.with_day(1).unwrap_or(date),
            end: last_day_of_month(date),
        }
    }

    /// January 1st to December 31st of `year`
    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::InvalidPeriod(format!("no such year {}", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| Error::InvalidPeriod(format!("no such year {}", year)))?;
        Ok(Self { start, end })
    }

    /// Number of days in the range, both ends included
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// First instant of the start day
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last second of the end day
    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1)
    }

    /// Temporal midpoint `(start + end) / 2`
    pub fn midpoint(&self) -> NaiveDateTime {
        let start = self.start_instant();
        start + (self.end_instant() - start) / 2
    }

    /// The same range one calendar month earlier
    ///
    /// Both ends move back one month; a day that does not exist in the
    /// earlier month clamps to that month's last day (Mar 31 -> Feb 29).
    pub fn previous_month(&self) -> Option<Self> {
        let start = self.start.checked_sub_months(Months::new(1))?;
        let end = self.end.checked_sub_months(Months::new(1))?;
        Some(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Last calendar day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidPeriod(format!("invalid date '{}' (use YYYY-MM-DD)", s)))
}

/// Named periods relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    Last30Days,
    Last90Days,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::ThisYear => "this-year",
            Self::LastYear => "last-year",
            Self::Last30Days => "last-30-days",
            Self::Last90Days => "last-90-days",
        }
    }

    /// Resolve to a concrete range; month and year presets cover the whole
    /// calendar month/year, day-count presets end on `today`
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::ThisMonth => DateRange::month_of(today),
            Self::LastMonth => {
                let current = DateRange::month_of(today);
                let prev = current.start.pred_opt().unwrap_or(current.start);
                DateRange::month_of(prev)
            }
            Self::ThisYear => {
                DateRange::year(today.year()).unwrap_or_else(|_| DateRange::month_of(today))
            }
            Self::LastYear => {
                DateRange::year(today.year() - 1).unwrap_or_else(|_| DateRange::month_of(today))
            }
            Self::Last30Days => DateRange {
                start: today - Duration::days(29),
                end: today,
            },
            Self::Last90Days => DateRange {
                start: today - Duration::days(89),
                end: today,
            },
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "this-month" => Ok(Self::ThisMonth),
            "last-month" => Ok(Self::LastMonth),
            "this-year" => Ok(Self::ThisYear),
            "last-year" => Ok(Self::LastYear),
            "last-30-days" => Ok(Self::Last30Days),
            "last-90-days" => Ok(Self::Last90Days),
            _ => Err(Error::InvalidPeriod(format!(
                "unknown period: {}. Available: this-month, last-month, this-year, last-year, last-30-days, last-90-days",
                s
            ))),
        }
    }
}
