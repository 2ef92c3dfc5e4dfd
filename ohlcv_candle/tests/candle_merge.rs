use ohlcv_candle::{Candle, MergeError, Timeframe, TimePeriod};

mod common;
use common::{at, candle_with_trades, d, period};

#[test]
fn five_minute_trades_scenario() {
    let c = candle_with_trades(
        period((10, 0), (10, 5)),
        &[("2", "100"), ("3", "105"), ("1", "98")],
    );

    assert_eq!(c.open(), d("100"));
    assert_eq!(c.close(), d("98"));
    assert_eq!(c.high(), d("105"));
    assert_eq!(c.low(), d("98"));
    assert_eq!(c.volume(), d("6"));
    assert_eq!(c.trade_count(), 3);
}

#[test]
fn merge_sub_candle_scenario() {
    let mut a = candle_with_trades(
        period((10, 0), (10, 10)),
        &[("2", "100"), ("3", "105"), ("1", "98")],
    );
    // high/low/close/volume/count fixed independently of any trade sequence
    let b: Candle = serde_json::from_value(serde_json::json!({
        "period": { "start": "2024-01-02T10:05:00Z", "end": "2024-01-02T10:10:00Z" },
        "open": "101",
        "close": "107",
        "high": "110",
        "low": "100",
        "volume": "4",
        "trade_count": 2,
        "has_data": true
    }))
    .unwrap();

    a.merge(&b).expect("b starts inside a");

    assert_eq!(a.open(), d("100"));
    assert_eq!(a.high(), d("110"));
    assert_eq!(a.low(), d("98"));
    assert_eq!(a.close(), d("107"));
    assert_eq!(a.volume(), d("10"));
    assert_eq!(a.trade_count(), 5);
}

#[test]
fn overhanging_sub_candle_is_accepted() {
    let mut a = candle_with_trades(period((10, 0), (10, 10)), &[("1", "10")]);
    let b = candle_with_trades(period((10, 9), (10, 30)), &[("1", "12")]);
    assert!(a.merge(&b).is_ok());
    assert_eq!(a.close(), d("12"));
}

#[test]
fn out_of_window_merges_leave_receiver_untouched() {
    let mut a = candle_with_trades(period((10, 0), (10, 10)), &[("1", "10")]);
    let before = a.clone();

    for p in [
        period((9, 55), (10, 5)),
        period((10, 0), (10, 5)),
        period((10, 10), (10, 15)),
        period((11, 0), (11, 5)),
    ] {
        let b = candle_with_trades(p, &[("5", "1000")]);
        let err = a.merge(&b).unwrap_err();
        assert_eq!(
            err,
            MergeError::OutsideWindow {
                receiver: *a.period(),
                other_start: p.start(),
            }
        );
        assert!(err.to_string().contains("does not start inside"));
    }
    assert!(a.update_candle(None).is_ok());
    assert_eq!(a, before);
}

#[test]
fn build_fifteen_minutes_from_one_minute_buckets() {
    let tf: Timeframe = "15m".parse().unwrap();
    let window = TimePeriod::containing(at(10, 7), tf).unwrap();
    assert_eq!(window, period((10, 0), (10, 15)));
    let mut wide = Candle::new(window);

    let one: Timeframe = "1m".parse().unwrap();
    // the first minute starts on the window's own start, which a merge rejects,
    // so it is fed as trades directly
    wide.add_trade(d("1"), d("50"));
    for minute in 1..15 {
        let sub_period = TimePeriod::containing(at(10, minute), one).unwrap();
        let price = (50 + minute).to_string();
        let sub = candle_with_trades(sub_period, &[("1", "49"), ("1", &price)]);
        wide.update_candle(Some(&sub)).unwrap();
    }

    assert_eq!(wide.open(), d("50"));
    assert_eq!(wide.low(), d("49"));
    assert_eq!(wide.high(), d("64"));
    assert_eq!(wide.close(), d("64"));
    assert_eq!(wide.trade_count(), 29);
    assert_eq!(wide.volume(), d("29"));
}

#[test]
fn rendering_omits_trade_count() {
    let c = candle_with_trades(
        period((10, 0), (10, 5)),
        &[("2", "100"), ("3", "105.5"), ("1", "98.125")],
    );
    let out = c.render();
    assert_eq!(out.lines().count(), 6);
    assert_eq!(
        out,
        "Time:\t2024-01-02T10:00:00Z -> 2024-01-02T10:05:00Z\n\
         Open:\t100.00\n\
         Close:\t98.12\n\
         High:\t105.50\n\
         Low:\t98.12\n\
         Volume:\t6.00"
    );
}
