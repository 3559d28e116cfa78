//! Setup detection on the latest bars: pullback in trend, range breakout and engulfing reversal.

use super::points::{closes, to_ohlcv_points};
use super::window::{moving_average, swing_high, swing_low};
use crate::types::{HistoryPoint, RawHistoryRecord, Setup};

pub const PATTERN_MIN_POINTS: usize = 5;
pub const SMA_FAST: usize = 20;
pub const SMA_SLOW: usize = 50;
pub const BREAKOUT_LOOKBACK: usize = 20;

/// Close crossing back over the fast average while the fast average sits on the trend side of the slow one.
pub fn detect_pullback(points: &[HistoryPoint]) -> Option<Setup> {
    let closes = closes(points);
    let sma_fast = moving_average(&closes, SMA_FAST)?;
    let sma_slow = moving_average(&closes, SMA_SLOW)?;
    let [.., prev, last] = closes.as_slice() else {
        return None;
    };

    if sma_fast > sma_slow && *prev < sma_fast && *last > sma_fast {
        return Some(Setup::PullbackUp);
    }
    if sma_fast < sma_slow && *prev > sma_fast && *last < sma_fast {
        return Some(Setup::PullbackDown);
    }
    None
}

/// Latest close leaving the range of the preceding `BREAKOUT_LOOKBACK` closes.
pub fn detect_breakout(points: &[HistoryPoint]) -> Option<Setup> {
    let closes = closes(points);
    let (last, prior) = closes.split_last()?;
    let high = swing_high(prior, BREAKOUT_LOOKBACK)?;
    let low = swing_low(prior, BREAKOUT_LOOKBACK)?;

    if *last > high {
        Some(Setup::BreakoutUp)
    } else if *last < low {
        Some(Setup::BreakoutDown)
    } else {
        None
    }
}

/// Engulfing candle: the latest body covers the previous body in the opposite direction.
pub fn detect_reversal(points: &[HistoryPoint]) -> Option<Setup> {
    let [.., prev, last] = points else {
        return None;
    };

    let bullish = prev.is_bearish()
        && last.is_bullish()
        && last.open <= prev.close
        && last.close >= prev.open;
    let bearish = prev.is_bullish()
        && last.is_bearish()
        && last.open >= prev.close
        && last.close <= prev.open;

    if bullish {
        Some(Setup::BullishEngulfing)
    } else if bearish {
        Some(Setup::BearishEngulfing)
    } else {
        None
    }
}

/// Every firing detector, in pullback, breakout, reversal order.
pub fn detect_setups(history: &[RawHistoryRecord]) -> Vec<Setup> {
    let points = to_ohlcv_points(history);
    if points.len() < PATTERN_MIN_POINTS {
        return Vec::new();
    }

    [
        detect_pullback(&points),
        detect_breakout(&points),
        detect_reversal(&points),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(i: usize, open: f64, close: f64) -> HistoryPoint {
        HistoryPoint {
            date: i as i64 * 86_400,
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 1000.0,
        }
    }

    fn flat(count: usize, price: f64) -> Vec<HistoryPoint> {
        (0..count).map(|i| bar(i, price, price)).collect()
    }

    fn to_records(points: &[HistoryPoint]) -> Vec<RawHistoryRecord> {
        points.iter().map(RawHistoryRecord::from).collect()
    }

    #[test]
    fn test_setups_require_five_points() {
        let mut points = flat(4, 100.0);
        points[3] = bar(3, 90.0, 120.0);
        assert!(detect_setups(&to_records(&points)).is_empty());
    }

    #[test]
    fn test_bullish_engulfing() {
        let mut points = flat(5, 100.0);
        points[3] = bar(3, 102.0, 99.0);
        points[4] = bar(4, 98.5, 103.0);
        assert_eq!(detect_reversal(&points), Some(Setup::BullishEngulfing));
    }

    #[test]
    fn test_bearish_engulfing() {
        let mut points = flat(5, 100.0);
        points[3] = bar(3, 99.0, 102.0);
        points[4] = bar(4, 102.5, 98.0);
        assert_eq!(detect_reversal(&points), Some(Setup::BearishEngulfing));
    }

    #[test]
    fn test_engulfing_body_must_cover_previous_body() {
        let mut points = flat(5, 100.0);
        points[3] = bar(3, 102.0, 99.0);
        points[4] = bar(4, 99.5, 101.0);
        assert_eq!(detect_reversal(&points), None);
    }

    #[test]
    fn test_breakout_up_and_down() {
        let mut points = flat(21, 100.0);
        points[20] = bar(20, 100.0, 101.0);
        assert_eq!(detect_breakout(&points), Some(Setup::BreakoutUp));

        points[20] = bar(20, 100.0, 99.0);
        assert_eq!(detect_breakout(&points), Some(Setup::BreakoutDown));
    }

    #[test]
    fn test_breakout_needs_full_prior_window() {
        let mut points = flat(20, 100.0);
        points[19] = bar(19, 100.0, 120.0);
        assert_eq!(detect_breakout(&points), None);
    }

    #[test]
    fn test_breakout_equal_extreme_does_not_fire() {
        let points = flat(25, 100.0);
        assert_eq!(detect_breakout(&points), None);
    }

    #[test]
    fn test_pullback_in_uptrend() {
        // 48 rising closes, a dip under the fast average, then a close back above it.
        let mut points: Vec<HistoryPoint> =
            (0..48).map(|i| bar(i, 100.0 + i as f64, 100.0 + i as f64)).collect();
        points.push(bar(48, 130.0, 130.0));
        points.push(bar(49, 145.0, 145.0));

        let closes = closes(&points);
        let fast = moving_average(&closes, SMA_FAST).unwrap();
        let slow = moving_average(&closes, SMA_SLOW).unwrap();
        assert!(fast > slow);
        assert!(130.0 < fast && 145.0 > fast);
        assert_eq!(detect_pullback(&points), Some(Setup::PullbackUp));
    }

    #[test]
    fn test_pullback_in_downtrend() {
        let mut points: Vec<HistoryPoint> =
            (0..48).map(|i| bar(i, 200.0 - i as f64, 200.0 - i as f64)).collect();
        points.push(bar(48, 170.0, 170.0));
        points.push(bar(49, 155.0, 155.0));
        assert_eq!(detect_pullback(&points), Some(Setup::PullbackDown));
    }

    #[test]
    fn test_pullback_needs_slow_average() {
        let points = flat(49, 100.0);
        assert_eq!(detect_pullback(&points), None);
    }

    #[test]
    fn test_detectors_are_combined() {
        // Bearish bar then a bullish engulfing bar that also breaks the 20-bar range.
        let mut points = flat(25, 100.0);
        points[23] = bar(23, 100.5, 99.5);
        points[24] = bar(24, 99.0, 104.0);
        assert_eq!(
            detect_setups(&to_records(&points)),
            vec![Setup::BreakoutUp, Setup::BullishEngulfing]
        );
    }
}
