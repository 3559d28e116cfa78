//! Normalization of raw provider records into validated point sequences.
//!
//! Records with a missing or non-finite field are dropped silently. Output
//! is always ascending by date; records sharing a date keep their input order.

use crate::types::{ClosePoint, HistoryPoint, RawHistoryRecord};

/// Close-only points, used by trend and momentum.
pub fn to_close_points(history: &[RawHistoryRecord]) -> Vec<ClosePoint> {
    let mut points: Vec<ClosePoint> = history
        .iter()
        .filter_map(|record| {
            Some(ClosePoint {
                date: record.date()?,
                close: record.close()?,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Full OHLCV points, used by patterns, confirmations and risk.
pub fn to_ohlcv_points(history: &[RawHistoryRecord]) -> Vec<HistoryPoint> {
    let mut points: Vec<HistoryPoint> = history
        .iter()
        .filter_map(|record| {
            Some(HistoryPoint {
                date: record.date()?,
                open: record.open()?,
                high: record.high()?,
                low: record.low()?,
                close: record.close()?,
                volume: record.volume()?,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Closing prices of a point sequence.
pub fn closes(points: &[HistoryPoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}
