//! Trailing-window statistics.

fn tail(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}

/// Simple moving average of the last `period` values.
///
/// Accumulated as offsets from the first value, so a constant window averages to exactly that value.
pub fn moving_average(values: &[f64], period: usize) -> Option<f64> {
    let window = tail(values, period)?;
    let first = window[0];
    let offset = window.iter().map(|v| v - first).sum::<f64>() / period as f64;
    Some(first + offset)
}

/// Highest of the last `lookback` values, latest included.
pub fn swing_high(values: &[f64], lookback: usize) -> Option<f64> {
    let window = tail(values, lookback)?;
    Some(window.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Lowest of the last `lookback` values, latest included.
pub fn swing_low(values: &[f64], lookback: usize) -> Option<f64> {
    let window = tail(values, lookback)?;
    Some(window.iter().copied().fold(f64::INFINITY, f64::min))
}
