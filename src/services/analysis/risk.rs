//! Risk/reward plan and chart levels.

use super::points::{closes, to_ohlcv_points};
use super::window::{swing_high, swing_low};
use crate::types::{HistoryPoint, Levels, RawHistoryRecord, RejectReason, RiskPlan};

pub const RISK_LOOKBACK: usize = 20;
/// Reward multiple of the risk used for the target.
pub const TARGET_RR: f64 = 2.0;
pub const LEVEL_LOOKBACK: usize = 20;

fn lowest_low(points: &[HistoryPoint], lookback: usize) -> f64 {
    points[points.len() - lookback..]
        .iter()
        .map(|p| p.low)
        .fold(f64::INFINITY, f64::min)
}

/// Long plan: enter at the last close, stop under the 20-bar low, target at `TARGET_RR` times the risk.
pub fn compute_risk_reward(history: &[RawHistoryRecord]) -> RiskPlan {
    let points = to_ohlcv_points(history);
    let Some(last) = points.last() else {
        return RiskPlan::Rejected(RejectReason::NoData);
    };
    if points.len() < RISK_LOOKBACK + 1 {
        return RiskPlan::Rejected(RejectReason::NoData);
    }

    let entry = last.close;
    let stop = lowest_low(&points, RISK_LOOKBACK);
    if !entry.is_finite() || !stop.is_finite() || entry <= stop {
        return RiskPlan::Rejected(RejectReason::Invalid);
    }

    let risk = entry - stop;
    let target = entry + risk * TARGET_RR;
    // Recomputed from the target on purpose; scoring reads this value.
    let rr = (target - entry) / risk;

    RiskPlan::Planned {
        entry,
        stop,
        target,
        rr,
        is_good: rr >= TARGET_RR,
    }
}

/// Breakout range of the last 20 closes and the invalidation stop under the last 20 lows.
pub fn compute_levels(history: &[RawHistoryRecord]) -> Levels {
    let points = to_ohlcv_points(history);
    if points.len() < LEVEL_LOOKBACK + 1 {
        return Levels::Rejected(RejectReason::NoData);
    }

    let closes = closes(&points);
    let (Some(breakout_high), Some(breakout_low)) = (
        swing_high(&closes, LEVEL_LOOKBACK),
        swing_low(&closes, LEVEL_LOOKBACK),
    ) else {
        return Levels::Rejected(RejectReason::NoData);
    };
    let stop = lowest_low(&points, LEVEL_LOOKBACK);

    if !breakout_high.is_finite() || !breakout_low.is_finite() || !stop.is_finite() {
        return Levels::Rejected(RejectReason::Invalid);
    }

    Levels::Found {
        breakout_high,
        breakout_low,
        stop,
        invalidation: stop,
    }
}
