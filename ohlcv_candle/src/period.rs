//! Time windows summarized by a candle.
//!
//! A [`TimePeriod`] is a pair of UTC instants. By convention the end is
//! exclusive: a 5-minute period starting at 10:00 is `[10:00, 10:05)`.
//!
//! The textual form is two RFC-3339 timestamps joined by `" -> "`:
//! ```
//! use ohlcv_candle::period::TimePeriod;
//!
//! let p: TimePeriod = "2024-01-02T10:00:00Z -> 2024-01-02T10:05:00Z".parse().unwrap();
//! assert_eq!(p.length().num_minutes(), 5);
//! assert_eq!(p.to_string(), "2024-01-02T10:00:00Z -> 2024-01-02T10:05:00Z");
//! ```

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PeriodError;

const SEPARATOR: &str = " -> ";

/// A UTC time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimePeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimePeriod {
    /// Build a period without validating the ordering of `start` and `end`.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Build a period, rejecting `end <= start`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PeriodError> {
        if end <= start {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// `[start, start + length)`.
    pub fn with_length(start: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    /// Inclusive start instant.
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end instant.
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Width of the window.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Time elapsed from `other`'s start to this period's start.
    pub fn since(&self, other: &TimePeriod) -> Duration {
        self.start - other.start
    }

    /// Shift the window by `iterations` whole lengths (negative moves back).
    pub fn advance(&self, iterations: i32) -> Self {
        let shift = self.length() * iterations;
        Self {
            start: self.start + shift,
            end: self.end + shift,
        }
    }

    /// True when `other` starts strictly after this period starts and strictly
    /// before it ends. `other`'s end is not considered.
    pub fn starts_within(&self, other: &TimePeriod) -> bool {
        self.start < other.start && self.end > other.start
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

impl FromStr for TimePeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| PeriodError::MissingSeparator(s.to_string()))?;
        Self::try_new(parse_utc(start)?, parse_utc(end)?)
    }
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, PeriodError> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PeriodError::Timestamp {
            input: s.to_string(),
            message: e.to_string(),
        })
}
