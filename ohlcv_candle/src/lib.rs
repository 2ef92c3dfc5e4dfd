//! OHLCV candles over fixed UTC time windows.
//!
//! - [`candle::Candle`]: open/high/low/close/volume/trade-count aggregate,
//!   fed by trades or by merging narrower candles.
//! - [`period::TimePeriod`]: the window a candle summarizes.
//! - [`timeframe::Timeframe`]: uniform intervals and bucket alignment, for
//!   deriving the window that contains a given instant.
//! - [`config::DisplayConfig`]: rendering precision.
//!
//! Candles carry no internal synchronization; whoever owns the in-progress
//! candle serializes mutation.

#![deny(missing_docs)]

pub mod candle;
pub mod config;
pub mod errors;
pub mod period;
pub mod timeframe;

pub use candle::Candle;
pub use errors::{MergeError, PeriodError, TimeframeError};
pub use period::TimePeriod;
pub use rust_decimal::Decimal;
pub use timeframe::{Timeframe, TimeframeUnit};
