//! Volume and key-level confirmations.

use super::points::{closes, to_ohlcv_points};
use super::window::{moving_average, swing_high, swing_low};
use crate::types::{Confirmation, HistoryPoint, RawHistoryRecord};

pub const CONFIRMATION_MIN_POINTS: usize = 5;
pub const VOLUME_LOOKBACK: usize = 20;
pub const VOLUME_MULTIPLIER: f64 = 1.5;
pub const KEYLEVEL_LOOKBACK: usize = 20;
pub const KEYLEVEL_SMA: usize = 50;
/// Relative distance counted as "at" a level.
pub const KEYLEVEL_TOLERANCE: f64 = 0.005;

/// Latest volume at least `VOLUME_MULTIPLIER` times its 20-period average.
///
/// Only positive volumes are considered; the latest volume is the latest positive one.
pub fn confirm_volume(points: &[HistoryPoint]) -> Option<Confirmation> {
    let volumes: Vec<f64> = points
        .iter()
        .map(|p| p.volume)
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if volumes.len() < VOLUME_LOOKBACK + 1 {
        return None;
    }

    let last = *volumes.last()?;
    let average = moving_average(&volumes, VOLUME_LOOKBACK)?;
    (last >= average * VOLUME_MULTIPLIER).then_some(Confirmation::VolumeAboveAverage)
}

fn near(value: f64, level: f64) -> bool {
    (value - level).abs() / level <= KEYLEVEL_TOLERANCE
}

/// Latest close within tolerance of the 20-period high, 20-period low or 50-period average, in that order.
pub fn confirm_key_level(points: &[HistoryPoint]) -> Option<Confirmation> {
    if points.len() < KEYLEVEL_LOOKBACK + 1 {
        return None;
    }

    let closes = closes(points);
    let last = *closes.last()?;
    let high = swing_high(&closes, KEYLEVEL_LOOKBACK)?;
    let low = swing_low(&closes, KEYLEVEL_LOOKBACK)?;
    // Zero levels cannot anchor a relative tolerance.
    if high == 0.0 || low == 0.0 || last == 0.0 {
        return None;
    }
    let sma = moving_average(&closes, KEYLEVEL_SMA).filter(|v| *v != 0.0);

    if near(last, high) {
        Some(Confirmation::CloseAtHigh)
    } else if near(last, low) {
        Some(Confirmation::CloseAtLow)
    } else if sma.is_some_and(|sma| near(last, sma)) {
        Some(Confirmation::CloseAtSma50)
    } else {
        None
    }
}

/// Every firing confirmation, volume first.
pub fn detect_confirmations(history: &[RawHistoryRecord]) -> Vec<Confirmation> {
    let points = to_ohlcv_points(history);
    if points.len() < CONFIRMATION_MIN_POINTS {
        return Vec::new();
    }

    [confirm_volume(&points), confirm_key_level(&points)]
        .into_iter()
        .flatten()
        .collect()
}
