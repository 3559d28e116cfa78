//! History providers.

pub mod brapi;

pub use brapi::BrapiClient;

use crate::error::Result;
use crate::types::HistoryPayload;
use async_trait::async_trait;

/// A provider of daily history for a single symbol.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Fetch raw history for an already-normalized symbol.
    ///
    /// `range` and `interval` use the provider's vocabulary ("3mo", "1d").
    async fn fetch_history(&self, symbol: &str, range: &str, interval: &str) -> Result<HistoryPayload>;
}
