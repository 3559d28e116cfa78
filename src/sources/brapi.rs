//! brapi.dev client for B3 daily history.
//!
//! History comes from the quote endpoint with `range`/`interval` parameters,
//! in `results[0].historicalDataPrice`.

use super::HistorySource;
use crate::config::BrapiConfig;
use crate::error::{AppError, Result};
use crate::types::{HistoryPayload, RawHistoryRecord};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before the first retry; doubled on each further attempt.
const RETRY_BASE_DELAY_MS: u64 = 250;

#[derive(Debug, Deserialize)]
struct BrapiQuoteResponse {
    #[serde(default)]
    results: Vec<BrapiResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrapiResult {
    symbol: Option<String>,
    #[serde(alias = "logoUrl")]
    logourl: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    #[serde(default)]
    historical_data_price: Vec<RawHistoryRecord>,
}

#[derive(Debug, Deserialize)]
struct BrapiErrorBody {
    message: Option<String>,
}

/// brapi API client.
pub struct BrapiClient {
    client: Client,
    config: BrapiConfig,
}

impl BrapiClient {
    pub fn new(config: BrapiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("confluence/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/quote/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }

    async fn request_once(&self, symbol: &str, range: &str, interval: &str) -> Result<HistoryPayload> {
        let mut request = self
            .client
            .get(self.quote_url(symbol))
            .query(&[("range", range), ("interval", interval)]);
        if let Some(ref token) = self.config.api_key {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<BrapiErrorBody>().await.ok();
            debug!(
                "brapi returned {} for {}: {:?}",
                status,
                symbol,
                body.and_then(|b| b.message)
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
            });
        }

        let data: BrapiQuoteResponse = response.json().await?;
        into_payload(symbol, data)
    }
}

fn into_payload(symbol: &str, data: BrapiQuoteResponse) -> Result<HistoryPayload> {
    let result = data
        .results
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Nao encontrado: {}", symbol)))?;

    Ok(HistoryPayload {
        symbol: result.symbol.unwrap_or_else(|| symbol.to_string()),
        history: result.historical_data_price,
        logo: result.logourl,
        name: result.long_name.or(result.short_name),
    })
}

/// Transport failures, throttling and server errors are worth another attempt.
fn is_retryable(err: &AppError) -> bool {
    match err {
        AppError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        AppError::Upstream { status } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
        }
        _ => false,
    }
}

#[async_trait]
impl HistorySource for BrapiClient {
    fn name(&self) -> &str {
        "brapi"
    }

    async fn fetch_history(&self, symbol: &str, range: &str, interval: &str) -> Result<HistoryPayload> {
        let mut attempt = 0;
        loop {
            match self.request_once(symbol, range, interval).await {
                Ok(payload) => {
                    debug!(
                        "brapi history for {} ({} {}): {} records",
                        symbol,
                        range,
                        interval,
                        payload.history.len()
                    );
                    return Ok(payload);
                }
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS << attempt.min(8));
                    warn!(
                        "brapi request for {} failed ({}), retrying in {:?}",
                        symbol, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
