//! OHLCV aggregation over a single [`TimePeriod`].
//!
//! A [`Candle`] is built either trade by trade with [`Candle::add_trade`] or by
//! folding narrower candles into a wider one with [`Candle::merge`], e.g. a
//! 5-minute candle from five 1-minute candles.
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use ohlcv_candle::{candle::Candle, period::TimePeriod};
//! use rust_decimal::Decimal;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
//! let mut candle = Candle::new(TimePeriod::with_length(start, Duration::minutes(5)));
//! candle.add_trade(Decimal::from(2), Decimal::from(100));
//! candle.add_trade(Decimal::from(3), Decimal::from(105));
//!
//! assert_eq!(candle.high(), Decimal::from(105));
//! assert_eq!(candle.volume(), Decimal::from(5));
//! ```

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::{debug, trace};

use crate::{config::DisplayConfig, errors::MergeError, period::TimePeriod};

/// Open/high/low/close/volume statistics for one time period.
///
/// Price and volume fields read as zero until the first trade or non-empty
/// merge lands; [`Candle::has_data`] tells an empty candle apart from one
/// that saw a zero-priced trade.
///
/// Deserialization checks the same invariants the mutators keep: an empty
/// candle is all zeros, and a non-empty one has `low <= open, close <= high`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candle {
    period: TimePeriod,
    open: Decimal,
    close: Decimal,
    high: Decimal,
    low: Decimal,
    volume: Decimal,
    trade_count: u64,
    has_data: bool,
}

impl Candle {
    /// An empty candle for `period`. The period is not validated.
    pub fn new(period: TimePeriod) -> Self {
        Self {
            period,
            open: Decimal::ZERO,
            close: Decimal::ZERO,
            high: Decimal::ZERO,
            low: Decimal::ZERO,
            volume: Decimal::ZERO,
            trade_count: 0,
            has_data: false,
        }
    }

    /// Window this candle summarizes.
    pub fn period(&self) -> &TimePeriod {
        &self.period
    }

    /// Price of the first trade.
    pub fn open(&self) -> Decimal {
        self.open
    }

    /// Price of the latest trade or merged candle.
    pub fn close(&self) -> Decimal {
        self.close
    }

    /// Highest price seen.
    pub fn high(&self) -> Decimal {
        self.high
    }

    /// Lowest price seen.
    pub fn low(&self) -> Decimal {
        self.low
    }

    /// Sum of traded amounts.
    pub fn volume(&self) -> Decimal {
        self.volume
    }

    /// Number of trades absorbed, directly or through merges.
    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Whether any price has been recorded yet.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Record one trade. The first trade sets open, high and low; every trade
    /// sets close.
    ///
    /// Volume saturates at the `Decimal` bounds instead of overflowing.
    pub fn add_trade(&mut self, amount: Decimal, price: Decimal) {
        if self.has_data {
            self.high = self.high.max(price);
            self.low = self.low.min(price);
        } else {
            self.open = price;
            self.high = price;
            self.low = price;
            self.has_data = true;
        }
        self.close = price;
        self.volume = self.volume.saturating_add(amount);
        self.trade_count = self.trade_count.saturating_add(1);
    }

    /// Fold a narrower candle into this one.
    ///
    /// `other` must start strictly inside this candle's window; its end is not
    /// checked, so callers merging a candle that overhangs the window get what
    /// they asked for. Close is overwritten unconditionally, so sub-candles
    /// must be merged in chronological order.
    ///
    /// On error this candle is unchanged.
    pub fn merge(&mut self, other: &Candle) -> Result<(), MergeError> {
        if !self.period.starts_within(&other.period) {
            debug!(
                receiver = %self.period,
                other_start = %other.period.start(),
                "rejecting candle merge outside window"
            );
            return Err(MergeError::OutsideWindow {
                receiver: self.period,
                other_start: other.period.start(),
            });
        }

        let (Some(volume), Some(trade_count)) = (
            self.volume.checked_add(other.volume),
            self.trade_count.checked_add(other.trade_count),
        ) else {
            debug!(receiver = %self.period, "rejecting candle merge on overflow");
            return Err(MergeError::Overflow {
                receiver: self.period,
            });
        };

        if other.has_data {
            if self.has_data {
                self.high = self.high.max(other.high);
                self.low = self.low.min(other.low);
            } else {
                self.open = other.open;
                self.high = other.high;
                self.low = other.low;
                self.has_data = true;
            }
            self.close = other.close;
        }
        self.volume = volume;
        self.trade_count = trade_count;
        Ok(())
    }

    /// [`Candle::merge`] for callers holding an optional sub-candle; `None` is
    /// a no-op.
    pub fn update_candle(&mut self, other: Option<&Candle>) -> Result<(), MergeError> {
        match other {
            Some(other) => self.merge(other),
            None => {
                trace!(receiver = %self.period, "no candle to merge");
                Ok(())
            }
        }
    }

    /// Human-readable block with prices at two decimal places.
    pub fn render(&self) -> String {
        self.render_with(&DisplayConfig::default())
    }

    /// Human-readable block using `config`'s precision. Trade count is not
    /// part of the output.
    pub fn render_with(&self, config: &DisplayConfig) -> String {
        let dp = config.precision;
        format!(
            "Time:\t{}\nOpen:\t{}\nClose:\t{}\nHigh:\t{}\nLow:\t{}\nVolume:\t{}",
            self.period,
            fixed(self.open, dp),
            fixed(self.close, dp),
            fixed(self.high, dp),
            fixed(self.low, dp),
            fixed(self.volume, dp),
        )
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Round half-to-even to `dp` places, then pad with zeros to exactly `dp`.
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // rescale is a no-op when the mantissa has no room for more digits
    rounded.rescale(dp);
    let mut out = rounded.to_string();
    let missing = dp.saturating_sub(rounded.scale()) as usize;
    if missing > 0 {
        if rounded.scale() == 0 {
            out.push('.');
        }
        out.extend(std::iter::repeat_n('0', missing));
    }
    out
}

/// Wire shape of [`Candle`], validated before it becomes one.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CandleRecord {
    period: TimePeriod,
    open: Decimal,
    close: Decimal,
    high: Decimal,
    low: Decimal,
    volume: Decimal,
    trade_count: u64,
    has_data: bool,
}

impl CandleRecord {
    fn into_candle(self) -> Result<Candle, &'static str> {
        if self.has_data {
            let in_range = |p: Decimal| self.low <= p && p <= self.high;
            if !(in_range(self.open) && in_range(self.close)) {
                return Err("candle prices must satisfy low <= open, close <= high");
            }
        } else if !(self.open.is_zero()
            && self.close.is_zero()
            && self.high.is_zero()
            && self.low.is_zero()
            && self.volume.is_zero()
            && self.trade_count == 0)
        {
            return Err("candle without data must have zero prices, volume and trade count");
        }
        Ok(Candle {
            period: self.period,
            open: self.open,
            close: self.close,
            high: self.high,
            low: self.low,
            volume: self.volume,
            trade_count: self.trade_count,
            has_data: self.has_data,
        })
    }
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CandleRecord::deserialize(deserializer)?
            .into_candle()
            .map_err(de::Error::custom)
    }
}
