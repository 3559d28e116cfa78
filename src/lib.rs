//! Confluence - tradeability scoring for B3 equities.
//!
//! Daily OHLCV history is turned into a trend label, setups, confirmations,
//! a risk/reward plan and a 0-100 confluence score.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{AnalysisService, HistoryService};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub history_service: Arc<HistoryService>,
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Wire the services around a history source.
    pub fn new(config: Config, source: Arc<dyn sources::HistorySource>) -> Self {
        let history_service = HistoryService::new(source, config.history_cache_policy());
        let analysis_service =
            AnalysisService::new(history_service.clone(), config.analysis_cache_policy());
        Self {
            config: Arc::new(config),
            history_service,
            analysis_service,
        }
    }
}

// Re-export commonly used types
pub use services::analysis::{
    analyze, compute_levels, compute_momentum, compute_risk_reward, compute_score, compute_trend,
    detect_confirmations, detect_setups,
};
pub use types::*;
