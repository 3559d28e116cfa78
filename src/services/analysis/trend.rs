//! Trend classification from first/last close.

use super::points::to_close_points;
use crate::types::{RawHistoryRecord, TrendLabel, TrendResult};

/// Fractional move beyond which the series is trending.
pub const TREND_THRESHOLD: f64 = 0.02;
/// Minimum close points for a classification.
pub const TREND_MIN_POINTS: usize = 5;

/// Classify the whole slice. The caller picks the window by choosing how much history to pass.
pub fn compute_trend(history: &[RawHistoryRecord]) -> TrendResult {
    let points = to_close_points(history);
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return TrendResult::undefined();
    };
    if points.len() < TREND_MIN_POINTS || first.close == 0.0 {
        return TrendResult::undefined();
    }

    let change = (last.close - first.close) / first.close;
    if !change.is_finite() {
        return TrendResult::undefined();
    }

    let label = if change > TREND_THRESHOLD {
        TrendLabel::Up
    } else if change < -TREND_THRESHOLD {
        TrendLabel::Down
    } else {
        TrendLabel::Sideways
    };

    TrendResult { label, change }
}
