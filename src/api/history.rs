//! History passthrough endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::history::{normalize_symbol, parse_symbols};
use crate::types::HistoryPayload;
use crate::AppState;

/// Query parameters for the history endpoint. `symbols` is accepted as an alias; only the first symbol is used.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub symbol: Option<String>,
    pub symbols: Option<String>,
    pub range: Option<String>,
    pub interval: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum HistoryResult {
    Found {
        ok: bool,
        #[serde(flatten)]
        payload: HistoryPayload,
    },
    Failed {
        ok: bool,
        error: String,
    },
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub symbol: String,
    pub range: String,
    pub interval: String,
    pub result: HistoryResult,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_history))
}

/// Fetch history for one symbol. Provider failures are reported inside `result`, not as an HTTP error.
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let raw = [query.symbol.as_deref(), query.symbols.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default();
    let symbol = parse_symbols(raw, 1)
        .first()
        .and_then(|s| normalize_symbol(s))
        .ok_or_else(|| AppError::BadRequest("Informe symbol, ex: PETR4".to_string()))?;
    let range = query
        .range
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| state.config.default_range.clone());
    let interval = query
        .interval
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| state.config.default_interval.clone());

    let result = match state.history_service.fetch(&symbol, &range, &interval).await {
        Ok(payload) => HistoryResult::Found { ok: true, payload },
        Err(e) => HistoryResult::Failed {
            ok: false,
            error: e.to_string(),
        },
    };

    Ok(Json(HistoryResponse {
        symbol,
        range,
        interval,
        result,
    }))
}
