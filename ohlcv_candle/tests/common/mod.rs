#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ohlcv_candle::{Candle, Decimal, TimePeriod};

pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, h, m, 0).unwrap()
}

pub fn period(start: (u32, u32), end: (u32, u32)) -> TimePeriod {
    TimePeriod::new(at(start.0, start.1), at(end.0, end.1))
}

pub fn d(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

/// Candle over `p` fed with `(amount, price)` trades in order.
pub fn candle_with_trades(p: TimePeriod, trades: &[(&str, &str)]) -> Candle {
    let mut c = Candle::new(p);
    for (amount, price) in trades {
        c.add_trade(d(amount), d(price));
    }
    c
}
