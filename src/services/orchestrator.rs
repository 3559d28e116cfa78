//! Per-ticker analysis fan-out and the analysis cache.

use crate::services::analysis::analyze;
use crate::services::history::{normalize_symbol, normalize_symbols};
use crate::services::{Cache, CachePolicy, HistoryService};
use crate::types::AnalysisRecord;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds and caches one [`AnalysisRecord`] per ticker.
pub struct AnalysisService {
    history: Arc<HistoryService>,
    /// Keyed by normalized symbol.
    cache: Cache<AnalysisRecord>,
}

impl AnalysisService {
    pub fn new(history: Arc<HistoryService>, policy: CachePolicy) -> Arc<Self> {
        Arc::new(Self {
            history,
            cache: Cache::new(policy),
        })
    }

    /// Analyze every ticker concurrently and store each record, replacing any previous one.
    ///
    /// Returned keys are the normalized symbols; blank inputs are skipped.
    pub async fn build_analysis(
        &self,
        tickers: &[String],
        range: &str,
        interval: &str,
    ) -> HashMap<String, AnalysisRecord> {
        let symbols = normalize_symbols(tickers);

        let records = join_all(
            symbols
                .iter()
                .map(|symbol| self.analyze_ticker(symbol, range, interval)),
        )
        .await;

        let results: HashMap<String, AnalysisRecord> = symbols.into_iter().zip(records).collect();
        let ready = results.values().filter(|r| r.is_ok()).count();
        info!(
            "Built analysis for {} tickers ({} ready, {} unavailable)",
            results.len(),
            ready,
            results.len() - ready
        );
        results
    }

    async fn analyze_ticker(&self, symbol: &str, range: &str, interval: &str) -> AnalysisRecord {
        let record = match self.history.fetch(symbol, range, interval).await {
            Ok(payload) => {
                debug!(
                    "Analyzing {} with {} history records",
                    symbol,
                    payload.history.len()
                );
                analyze(&payload.history, payload.logo)
            }
            Err(e) => {
                warn!(
                    "History fetch from {} failed for {}: {}",
                    self.history.source_name(),
                    symbol,
                    e
                );
                AnalysisRecord::Unavailable
            }
        };

        self.cache.set(symbol.to_string(), record.clone());
        record
    }

    /// Latest stored record for a ticker.
    pub fn get(&self, symbol: &str) -> Option<AnalysisRecord> {
        self.cache.get(&normalize_symbol(symbol)?)
    }

    pub fn invalidate(&self, symbol: &str) {
        if let Some(symbol) = normalize_symbol(symbol) {
            self.cache.remove(&symbol);
            self.history.invalidate(&symbol);
        }
    }

    pub fn invalidate_all(&self) {
        self.cache.clear();
    }
}
