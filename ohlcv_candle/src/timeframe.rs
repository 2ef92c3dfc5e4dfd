//! Uniform bar intervals and UTC bucket alignment.
//!
//! A [`Timeframe`] pairs a non-zero amount with a [`TimeframeUnit`]. Bucket
//! ids count aligned windows from a stable anchor:
//!
//! - minute/hour/day: fixed-width seconds since the Unix epoch;
//! - week: Monday 00:00:00Z aligned (anchor 1969-12-29);
//! - month: calendar months, index 0 is 1970-01.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ohlcv_candle::{period::TimePeriod, timeframe::Timeframe};
//!
//! let tf: Timeframe = "5m".parse().unwrap();
//! let t = Utc.with_ymd_and_hms(2024, 1, 2, 10, 3, 17).unwrap();
//! let window = TimePeriod::containing(t, tf).unwrap();
//! assert_eq!(window.to_string(), "2024-01-02T10:00:00Z -> 2024-01-02T10:05:00Z");
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::TimeframeError, period::TimePeriod};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: i64 = 7 * SECS_PER_DAY;

/// 1970-01-01 is a Thursday; shifting by three days puts Monday 1969-12-29 at zero.
const WEEK_ANCHOR_OFFSET_SECS: i64 = 3 * SECS_PER_DAY;

/// Timeframe granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeframeUnit {
    /// UTC minute
    Minute,
    /// UTC hour
    Hour,
    /// UTC day
    Day,
    /// Monday-based, UTC
    Week,
    /// calendar months, UTC
    Month,
}

/// A timeframe = amount × unit (e.g., 5-Minute, 3-Hour, 2-Week, 6-Month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    amount: NonZeroU32,
    unit: TimeframeUnit,
}

impl Timeframe {
    /// Create a new timeframe.
    pub const fn new(amount: NonZeroU32, unit: TimeframeUnit) -> Self {
        Self { amount, unit }
    }

    /// Number of units per bucket.
    pub const fn amount(&self) -> NonZeroU32 {
        self.amount
    }

    /// Unit of the bucket.
    pub const fn unit(&self) -> TimeframeUnit {
        self.unit
    }

    /// Bucket width in seconds for the fixed-width units, `None` for months.
    fn fixed_width_secs(&self) -> Option<i64> {
        let per_unit = match self.unit {
            TimeframeUnit::Minute => SECS_PER_MINUTE,
            TimeframeUnit::Hour => SECS_PER_HOUR,
            TimeframeUnit::Day => SECS_PER_DAY,
            TimeframeUnit::Week => SECS_PER_WEEK,
            TimeframeUnit::Month => return None,
        };
        Some(per_unit * i64::from(self.amount.get()))
    }
}

/// Display/parse for config ergonomics (`"5m"`, `"1D"`, `"6M"`)
impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = match self.unit {
            TimeframeUnit::Minute => "m",
            TimeframeUnit::Hour => "h",
            TimeframeUnit::Day => "D",
            TimeframeUnit::Week => "W",
            TimeframeUnit::Month => "M",
        };
        write!(f, "{}{u}", self.amount)
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(last) = s.chars().last() else {
            return Err(TimeframeError::Empty);
        };
        let (digits, unit) = s.split_at(s.len() - last.len_utf8());
        let unit = match unit {
            "m" => TimeframeUnit::Minute,
            "h" => TimeframeUnit::Hour,
            "D" => TimeframeUnit::Day,
            "W" => TimeframeUnit::Week,
            "M" => TimeframeUnit::Month,
            _ => return Err(TimeframeError::UnknownUnit(unit.to_string())),
        };
        let amount: u32 = digits
            .parse()
            .map_err(|_| TimeframeError::InvalidAmount(digits.to_string()))?;
        let amount = NonZeroU32::new(amount).ok_or(TimeframeError::ZeroAmount)?;
        Ok(Timeframe::new(amount, unit))
    }
}

/// Compute the bucket id for a UTC timestamp.
pub fn bucket_id(ts_utc: DateTime<Utc>, tf: Timeframe) -> i64 {
    match (tf.unit, tf.fixed_width_secs()) {
        (TimeframeUnit::Week, Some(width)) => {
            (ts_utc.timestamp() + WEEK_ANCHOR_OFFSET_SECS).div_euclid(width)
        }
        (_, Some(width)) => ts_utc.timestamp().div_euclid(width),
        (_, None) => {
            let idx = (i64::from(ts_utc.year()) - 1970) * 12 + i64::from(ts_utc.month0());
            idx.div_euclid(i64::from(tf.amount.get()))
        }
    }
}

/// Get the UTC start instant for a bucket id.
///
/// Fails with [`TimeframeError::OutOfRange`] when the instant falls outside
/// the dates chrono can represent, which large amounts reach quickly.
pub fn bucket_start_utc(id: i64, tf: Timeframe) -> Result<DateTime<Utc>, TimeframeError> {
    let out_of_range = || TimeframeError::OutOfRange { id, timeframe: tf };
    match (tf.unit, tf.fixed_width_secs()) {
        (TimeframeUnit::Week, Some(width)) => id
            .checked_mul(width)
            .and_then(|secs| secs.checked_sub(WEEK_ANCHOR_OFFSET_SECS))
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(out_of_range),
        (_, Some(width)) => id
            .checked_mul(width)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(out_of_range),
        (_, None) => {
            let month_idx = id
                .checked_mul(i64::from(tf.amount.get()))
                .ok_or_else(out_of_range)?;
            let year =
                i32::try_from(1970 + month_idx.div_euclid(12)).map_err(|_| out_of_range())?;
            let month = month_idx.rem_euclid(12) as u32 + 1;
            Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
                .single()
                .ok_or_else(out_of_range)
        }
    }
}

/// Exclusive end instant for the bucket (start of the next bucket).
pub fn bucket_end_exclusive_utc(
    id: i64,
    tf: Timeframe,
) -> Result<DateTime<Utc>, TimeframeError> {
    match tf.fixed_width_secs() {
        Some(width) => bucket_start_utc(id, tf)?
            .checked_add_signed(Duration::seconds(width))
            .ok_or(TimeframeError::OutOfRange { id, timeframe: tf }),
        // month width varies
        None => {
            let next = id
                .checked_add(1)
                .ok_or(TimeframeError::OutOfRange { id, timeframe: tf })?;
            bucket_start_utc(next, tf)
        }
    }
}

impl TimePeriod {
    /// The aligned `tf` bucket that contains `ts_utc`.
    pub fn containing(ts_utc: DateTime<Utc>, tf: Timeframe) -> Result<Self, TimeframeError> {
        let id = bucket_id(ts_utc, tf);
        Ok(TimePeriod::new(
            bucket_start_utc(id, tf)?,
            bucket_end_exclusive_utc(id, tf)?,
        ))
    }
}
