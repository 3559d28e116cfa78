//! Cached access to a history source.

use crate::error::{AppError, Result};
use crate::services::{Cache, CachePolicy};
use crate::sources::HistorySource;
use crate::types::HistoryPayload;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Canonical ticker: trimmed, uppercased, exchange suffix dropped (`petr4.sa` → `PETR4`).
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    let symbol = symbol.split('.').next().unwrap_or_default().trim();
    (!symbol.is_empty()).then(|| symbol.to_string())
}

/// Comma-separated symbol list, trimmed, empties removed, truncated to `max`.
pub fn parse_symbols(raw: &str, max: usize) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max)
        .map(str::to_string)
        .collect()
}

/// Normalized tickers in request order, duplicates and blanks removed.
pub fn normalize_symbols(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .filter_map(|t| normalize_symbol(t))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// History fetcher with a per `SYMBOL|range|interval` cache.
pub struct HistoryService {
    source: Arc<dyn HistorySource>,
    cache: Cache<HistoryPayload>,
}

impl HistoryService {
    pub fn new(source: Arc<dyn HistorySource>, policy: CachePolicy) -> Arc<Self> {
        Arc::new(Self {
            source,
            cache: Cache::new(policy),
        })
    }

    fn cache_key(symbol: &str, range: &str, interval: &str) -> String {
        format!("{}|{}|{}", symbol, range, interval)
    }

    /// Fetch history, serving from cache when fresh. Failures are not cached.
    pub async fn fetch(&self, symbol: &str, range: &str, interval: &str) -> Result<HistoryPayload> {
        let symbol = normalize_symbol(symbol)
            .ok_or_else(|| AppError::BadRequest("Ticker vazio".to_string()))?;
        let key = Self::cache_key(&symbol, range, interval);

        if let Some(cached) = self.cache.get(&key) {
            debug!("History cache hit for {}", key);
            return Ok(cached);
        }

        let payload = self.source.fetch_history(&symbol, range, interval).await?;
        self.cache.set(key, payload.clone());
        Ok(payload)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Drop every cached range/interval of a symbol.
    pub fn invalidate(&self, symbol: &str) {
        if let Some(symbol) = normalize_symbol(symbol) {
            self.cache.remove_prefix(&format!("{}|", symbol));
        }
    }
}
