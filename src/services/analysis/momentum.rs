//! Rate of change over a fixed lookback.

use super::points::to_close_points;
use crate::types::RawHistoryRecord;

pub const MOMENTUM_LOOKBACK: usize = 14;

/// Return between the latest close and the close `MOMENTUM_LOOKBACK` bars earlier.
pub fn compute_momentum(history: &[RawHistoryRecord]) -> Option<f64> {
    let points = to_close_points(history);
    if points.len() < MOMENTUM_LOOKBACK + 1 {
        return None;
    }

    let recent = points[points.len() - 1].close;
    let past = points[points.len() - 1 - MOMENTUM_LOOKBACK].close;
    if !recent.is_finite() || !past.is_finite() || past == 0.0 {
        return None;
    }
    Some((recent - past) / past)
}
