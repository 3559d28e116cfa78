//! Confluence score: each signal is converted to points and the points are summed.

use super::confirmations::detect_confirmations;
use super::momentum::compute_momentum;
use super::patterns::detect_setups;
use super::risk::compute_risk_reward;
use super::trend::compute_trend;
use crate::types::{Confirmation, RawHistoryRecord, RiskPlan, ScoreBreakdown, ScoreResult, TrendLabel};

pub const TREND_UP_POINTS: u32 = 20;
pub const TREND_SIDEWAYS_POINTS: u32 = 10;
pub const TREND_UNDEFINED_POINTS: u32 = 5;
pub const TREND_DOWN_POINTS: u32 = 0;

pub const POINTS_PER_SETUP: u32 = 7;
pub const PATTERN_POINTS_CAP: u32 = 20;

pub const VOLUME_POINTS: u32 = 20;

/// (exclusive lower bound, points), checked top-down.
pub const MOMENTUM_TIERS: [(f64, u32); 4] = [(0.05, 20), (0.02, 15), (0.0, 10), (-0.02, 5)];

/// (inclusive lower bound, points), checked top-down.
pub const RR_TIERS: [(f64, u32); 3] = [(3.0, 20), (2.0, 15), (1.5, 8)];

pub fn trend_points(label: TrendLabel) -> u32 {
    match label {
        TrendLabel::Up => TREND_UP_POINTS,
        TrendLabel::Down => TREND_DOWN_POINTS,
        TrendLabel::Sideways => TREND_SIDEWAYS_POINTS,
        TrendLabel::Undefined => TREND_UNDEFINED_POINTS,
    }
}

pub fn pattern_points(setup_count: usize) -> u32 {
    let count = u32::try_from(setup_count).unwrap_or(u32::MAX);
    count.saturating_mul(POINTS_PER_SETUP).min(PATTERN_POINTS_CAP)
}

pub fn volume_points(confirmations: &[Confirmation]) -> u32 {
    if confirmations.contains(&Confirmation::VolumeAboveAverage) {
        VOLUME_POINTS
    } else {
        0
    }
}

pub fn momentum_points(momentum: Option<f64>) -> u32 {
    let Some(momentum) = momentum else {
        return 0;
    };
    MOMENTUM_TIERS
        .iter()
        .find(|(bound, _)| momentum > *bound)
        .map_or(0, |(_, points)| *points)
}

pub fn risk_reward_points(plan: &RiskPlan) -> u32 {
    let Some(rr) = plan.rr() else {
        return 0;
    };
    RR_TIERS
        .iter()
        .find(|(bound, _)| rr >= *bound)
        .map_or(0, |(_, points)| *points)
}

pub fn score_trend(history: &[RawHistoryRecord]) -> u32 {
    trend_points(compute_trend(history).label)
}

pub fn score_pattern(history: &[RawHistoryRecord]) -> u32 {
    pattern_points(detect_setups(history).len())
}

pub fn score_volume(history: &[RawHistoryRecord]) -> u32 {
    volume_points(&detect_confirmations(history))
}

pub fn score_momentum(history: &[RawHistoryRecord]) -> u32 {
    momentum_points(compute_momentum(history))
}

pub fn score_risk_reward(history: &[RawHistoryRecord]) -> u32 {
    risk_reward_points(&compute_risk_reward(history))
}

/// Score every signal from the same history slice. The total is not clamped.
pub fn compute_score(history: &[RawHistoryRecord]) -> ScoreResult {
    let breakdown = ScoreBreakdown {
        trend_score: score_trend(history),
        pattern_score: score_pattern(history),
        volume_score: score_volume(history),
        momentum_score: score_momentum(history),
        rr_score: score_risk_reward(history),
    };

    ScoreResult {
        total: breakdown.total(),
        breakdown,
    }
}
