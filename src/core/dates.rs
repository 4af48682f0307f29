//! Date range math, chart labels and granularity selection.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Granularity::Hour => "hour",
                Granularity::Day => "day",
                Granularity::Week => "week",
                Granularity::Month => "month",
                Granularity::Quarter => "quarter",
                Granularity::Year => "year",
            }
        )
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "year" => Ok(Granularity::Year),
            _ => Err(anyhow::anyhow!("Invalid granularity: {}", s)),
        }
    }
}

/// Upper bound (inclusive, in days) for each granularity. Anything longer
/// than the last entry is bucketed by year.
const GRANULARITY_BOUNDARIES: [(i64, Granularity); 5] = [
    (2, Granularity::Hour),
    (31, Granularity::Day),
    (90, Granularity::Week),
    (365, Granularity::Month),
    (1095, Granularity::Quarter),
];

#[derive(Debug, Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    granularity: Option<Granularity>,
}

/// An inclusive span of calendar days. `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = anyhow::Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        let granularity = match raw.granularity {
            Some(g) => g,
            None if raw.end >= raw.start => {
                get_granularity_for_range((raw.end - raw.start).num_days() + 1)
            }
            None => Granularity::Day,
        };
        DateRange::new(raw.start, raw.end, granularity)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Result<Self> {
        if end < start {
            bail!("Invalid date range: end {end} is before start {start}");
        }
        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

/// Number of calendar days covered by the range, counting both ends.
pub fn get_days_in_range(range: &DateRange) -> i64 {
    (range.end - range.start).num_days() + 1
}

/// Formats a timestamp as a chart axis label for the given bucket size.
pub fn format_date_for_granularity(date: NaiveDateTime, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hour => date.format("%b %-d, %-I %p").to_string(),
        Granularity::Day | Granularity::Week => date.format("%b %-d").to_string(),
        Granularity::Month => date.format("%b %Y").to_string(),
        Granularity::Quarter => format!("Q{} {}", (date.month() - 1) / 3 + 1, date.year()),
        Granularity::Year => date.format("%Y").to_string(),
    }
}

/// Picks the bucket size used to chart a range spanning `days` days.
pub fn get_granularity_for_range(days: i64) -> Granularity {
    GRANULARITY_BOUNDARIES
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map_or(Granularity::Year, |(_, granularity)| *granularity)
}

/// Returns the first day of the bucket that contains `date`. Weeks start on
/// Monday. Hour buckets collapse to the date itself.
pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Hour | Granularity::Day => date,
        Granularity::Week => {
            date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
        Granularity::Quarter => {
            let month = (date.month() - 1) / 3 * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
        }
        Granularity::Year => NaiveDate::from_yo_opt(date.year(), 1).unwrap_or(date),
    }
}
