//! Tradeability analysis of daily OHLCV history.
//!
//! Every function here is pure and total: insufficient or invalid data yields
//! a neutral value (`None`, empty list, `Rejected`) instead of an error, so any
//! subset can be called without running the whole pipeline.

pub mod confirmations;
pub mod momentum;
pub mod patterns;
pub mod points;
pub mod risk;
pub mod score;
pub mod trend;
pub mod window;

pub use confirmations::detect_confirmations;
pub use momentum::compute_momentum;
pub use patterns::detect_setups;
pub use points::{to_close_points, to_ohlcv_points};
pub use risk::{compute_levels, compute_risk_reward};
pub use score::compute_score;
pub use trend::compute_trend;
pub use window::{moving_average, swing_high, swing_low};

use crate::types::{AnalysisRecord, Quote, RawHistoryRecord, TickerAnalysis};

/// Snapshot of the latest valid bar.
pub fn latest_quote(history: &[RawHistoryRecord]) -> Option<Quote> {
    let last = *to_ohlcv_points(history).last()?;
    Some(Quote {
        open: last.open,
        high: last.high,
        low: last.low,
        close: last.close,
        volume: last.volume,
        timestamp: last.date.saturating_mul(1000),
    })
}

/// Run the full pipeline on one ticker's history.
///
/// A history without a single valid OHLCV bar is unusable and yields
/// `AnalysisRecord::Unavailable`; no score is produced for it.
pub fn analyze(history: &[RawHistoryRecord], logo: Option<String>) -> AnalysisRecord {
    let Some(quote) = latest_quote(history) else {
        return AnalysisRecord::Unavailable;
    };

    let risk = compute_risk_reward(history);
    let analysis = TickerAnalysis {
        score: compute_score(history),
        trend: compute_trend(history),
        setups: detect_setups(history),
        confirmations: detect_confirmations(history),
        rr: risk.rr().unwrap_or(0.0),
        risk,
        levels: compute_levels(history),
        quote,
        logo,
    };

    AnalysisRecord::Ready(Box::new(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawNumber;

    #[test]
    fn test_analyze_empty_history_is_unavailable() {
        assert_eq!(analyze(&[], None), AnalysisRecord::Unavailable);
    }

    #[test]
    fn test_analyze_history_without_valid_bars_is_unavailable() {
        let record = RawHistoryRecord {
            date: Some(RawNumber::Number(1.0)),
            close: Some(RawNumber::Number(10.0)),
            ..Default::default()
        };
        assert_eq!(analyze(&[record], None), AnalysisRecord::Unavailable);
    }

    #[test]
    fn test_latest_quote_uses_most_recent_date() {
        let history = vec![
            RawHistoryRecord::new(200, 2.0, 3.0, 1.0, 2.5, 20.0),
            RawHistoryRecord::new(100, 1.0, 2.0, 0.5, 1.5, 10.0),
        ];
        let quote = latest_quote(&history).unwrap();
        assert_eq!(quote.close, 2.5);
        assert_eq!(quote.timestamp, 200_000);
    }

    #[test]
    fn test_short_history_still_produces_record() {
        let history: Vec<RawHistoryRecord> = (0..3)
            .map(|i| RawHistoryRecord::new(i * 86_400, 10.0, 11.0, 9.0, 10.0, 100.0))
            .collect();
        let record = analyze(&history, Some("logo.svg".into()));
        let analysis = record.analysis().unwrap();
        assert_eq!(analysis.rr, 0.0);
        assert!(!analysis.risk.is_ok());
        assert!(analysis.setups.is_empty());
        assert_eq!(analysis.logo.as_deref(), Some("logo.svg"));
    }
}
