//! Error types for the `ohlcv_candle` crate.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{period::TimePeriod, timeframe::Timeframe};

/// Why a candle merge was rejected. The receiving candle is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The incoming candle does not start strictly inside the receiver's window.
    #[error("candle starting at {other_start} does not start inside {receiver}")]
    OutsideWindow {
        /// Period of the candle being merged into.
        receiver: TimePeriod,
        /// Start of the incoming candle's period.
        other_start: DateTime<Utc>,
    },

    /// Summing volume or trade count would overflow.
    #[error("merging into {receiver} would overflow volume or trade count")]
    Overflow {
        /// Period of the candle being merged into.
        receiver: TimePeriod,
    },
}

/// Errors raised while building or parsing a [`TimePeriod`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The end instant is not after the start instant.
    #[error("period end {end} must be after start {start}")]
    InvalidRange {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// The textual form lacked the `" -> "` separator.
    #[error("missing ' -> ' separator in period: {0:?}")]
    MissingSeparator(String),

    /// One side of the period was not an RFC-3339 timestamp.
    #[error("bad rfc3339 timestamp {input:?}: {message}")]
    Timestamp {
        /// The offending input.
        input: String,
        /// Parser message.
        message: String,
    },
}

/// Errors raised while parsing a [`Timeframe`](crate::timeframe::Timeframe).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeframeError {
    /// Empty input string.
    #[error("empty timeframe")]
    Empty,

    /// The numeric part was zero.
    #[error("amount must be > 0")]
    ZeroAmount,

    /// The numeric part did not parse.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The unit suffix is not one of `m`, `h`, `D`, `W`, `M`.
    #[error("unknown unit: {0:?}")]
    UnknownUnit(String),

    /// A bucket boundary lies outside the dates chrono can represent.
    #[error("bucket {id} of timeframe {timeframe} is outside the supported date range")]
    OutOfRange {
        /// Bucket id being resolved.
        id: i64,
        /// Timeframe the id belongs to.
        timeframe: Timeframe,
    },
}
