//! Property tests for analysis invariants.
//!
//! 1. Normalized points are ascending by date and finite
//! 2. Moving average of a constant series is that constant
//! 3. Every sub-score is one of its tier values and the total is their sum
//! 4. A produced risk plan always has stop < entry < target

use confluence::services::analysis::{moving_average, to_close_points, to_ohlcv_points};
use confluence::services::history::normalize_symbol;
use confluence::{compute_risk_reward, compute_score, RawHistoryRecord, RawNumber, RiskPlan};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_field() -> impl Strategy<Value = Option<RawNumber>> {
    prop_oneof![
        8 => (1.0..500.0_f64).prop_map(|v| Some(RawNumber::Number(v))),
        1 => Just(None),
        1 => Just(Some(RawNumber::Number(f64::NAN))),
        1 => Just(Some(RawNumber::Text("n/a".to_string()))),
    ]
}

fn arb_raw_record() -> impl Strategy<Value = RawHistoryRecord> {
    (0..10_000i64, arb_field(), arb_field(), arb_field(), arb_field(), arb_field()).prop_map(
        |(date, open, high, low, close, volume)| RawHistoryRecord {
            date: Some(RawNumber::Number(date as f64)),
            open,
            high,
            low,
            close,
            adjusted_close: None,
            volume,
        },
    )
}

/// A clean daily series with bounded moves.
fn arb_series() -> impl Strategy<Value = Vec<RawHistoryRecord>> {
    prop::collection::vec((-0.05..0.05_f64, 0.0..0.03_f64, 100.0..10_000.0_f64), 0..80).prop_map(
        |moves| {
            let mut close = 50.0;
            moves
                .into_iter()
                .enumerate()
                .map(|(i, (change, spread, volume))| {
                    let open = close;
                    close *= 1.0 + change;
                    let high = open.max(close) * (1.0 + spread);
                    let low = open.min(close) * (1.0 - spread);
                    RawHistoryRecord::new(i as i64 * 86_400, open, high, low, close, volume)
                })
                .collect()
        },
    )
}

// ── 1. Normalization ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_points_are_sorted_and_finite(
        history in prop::collection::vec(arb_raw_record(), 0..60)
    ) {
        let points = to_ohlcv_points(&history);
        prop_assert!(points.len() <= history.len());
        prop_assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        let finite = points.iter().all(|p| {
            p.open.is_finite() && p.high.is_finite() && p.low.is_finite()
                && p.close.is_finite() && p.volume.is_finite()
        });
        prop_assert!(finite);

        let closes = to_close_points(&history);
        prop_assert!(closes.len() >= points.len());
        prop_assert!(closes.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn symbol_normalization_is_idempotent(raw in "[ a-zA-Z0-9.]{0,12}") {
        if let Some(symbol) = normalize_symbol(&raw) {
            prop_assert_eq!(normalize_symbol(&symbol), Some(symbol.clone()));
            prop_assert!(!symbol.contains('.'));
        }
    }
}

// ── 2. Window statistics ─────────────────────────────────────────────

proptest! {
    #[test]
    fn moving_average_of_constant(value in 0.01..1000.0_f64, len in 1usize..100, period in 1usize..100) {
        let values = vec![value; len];
        match moving_average(&values, period) {
            Some(avg) => {
                prop_assert!(period <= len);
                prop_assert_eq!(avg, value);
            }
            None => prop_assert!(period > len),
        }
    }
}

// ── 3. Score bounds ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_is_sum_of_bounded_parts(history in arb_series()) {
        let score = compute_score(&history);
        let b = score.breakdown;
        prop_assert!([0, 5, 10, 20].contains(&b.trend_score));
        prop_assert!([0, 7, 14, 20].contains(&b.pattern_score));
        prop_assert!([0, 20].contains(&b.volume_score));
        prop_assert!([0, 5, 10, 15, 20].contains(&b.momentum_score));
        prop_assert!([0, 8, 15, 20].contains(&b.rr_score));
        prop_assert_eq!(
            score.total,
            b.trend_score + b.pattern_score + b.volume_score + b.momentum_score + b.rr_score
        );
        prop_assert!(score.total <= 100);
    }
}

// ── 4. Risk plan ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn risk_plan_brackets_entry(history in arb_series()) {
        if let RiskPlan::Planned { entry, stop, target, rr, is_good } = compute_risk_reward(&history) {
            prop_assert!(stop < entry);
            prop_assert!(entry < target);
            prop_assert!((rr - 2.0).abs() < 1e-6);
            prop_assert_eq!(is_good, rr >= 2.0);
        }
    }
}
