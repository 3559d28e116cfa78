//! Analysis endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::services::history::{normalize_symbols, parse_symbols};
use crate::types::AnalysisRecord;
use crate::AppState;

/// Query parameters for the analysis endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Comma-separated tickers, e.g. "PETR4,VALE3".
    pub symbols: Option<String>,
    pub range: Option<String>,
    pub interval: Option<String>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub symbols: Vec<String>,
    pub results: HashMap<String, AnalysisRecord>,
    /// Unix timestamp (milliseconds) when built.
    pub timestamp: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(build_analysis))
        .route("/:symbol", get(get_cached_analysis))
}

/// Fetch and analyze every requested ticker.
async fn build_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse>> {
    let symbols = normalize_symbols(&parse_symbols(
        query.symbols.as_deref().unwrap_or_default(),
        state.config.max_symbols,
    ));
    if symbols.is_empty() {
        return Err(AppError::BadRequest(
            "Informe symbols, ex: PETR4,VALE3".to_string(),
        ));
    }

    let range = query
        .range
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| state.config.default_range.clone());
    let interval = query
        .interval
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| state.config.default_interval.clone());

    let results = state
        .analysis_service
        .build_analysis(&symbols, range.trim(), interval.trim())
        .await;

    Ok(Json(AnalysisResponse {
        symbols,
        results,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}

/// Last stored analysis for a ticker.
async fn get_cached_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<AnalysisRecord>> {
    state
        .analysis_service
        .get(&symbol)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No analysis available for {}", symbol)))
}
