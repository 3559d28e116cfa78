use crate::services::CachePolicy;
use std::env;
use std::time::Duration;

/// Quote API (brapi) client configuration.
#[derive(Debug, Clone)]
pub struct BrapiConfig {
    /// API token; requests are sent unauthenticated when absent.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_ms: u64,
    /// Extra attempts after a failed request.
    pub max_retries: u32,
}

impl Default for BrapiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://brapi.dev/api".to_string(),
            timeout_ms: 15_000,
            max_retries: 2,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    pub brapi: BrapiConfig,
    /// History cache TTL (ms).
    pub history_cache_ttl_ms: u64,
    /// Analysis cache TTL (ms).
    pub analysis_cache_ttl_ms: u64,
    /// Size bound shared by both caches.
    pub cache_max_entries: usize,
    /// Maximum symbols accepted per request.
    pub max_symbols: usize,
    /// History range requested when the caller gives none (e.g. "3mo").
    pub default_range: String,
    /// Bar interval requested when the caller gives none (e.g. "1d").
    pub default_interval: String,
    /// Allowed CORS origin, "*" for any.
    pub cors_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            brapi: BrapiConfig::default(),
            history_cache_ttl_ms: 300_000,
            analysis_cache_ttl_ms: 300_000,
            cache_max_entries: 512,
            max_symbols: 10,
            default_range: "3mo".to_string(),
            default_interval: "1d".to_string(),
            cors_allow_origin: "*".to_string(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(fallback)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port),
            brapi: BrapiConfig {
                api_key: non_empty("BRAPI_API_KEY").or_else(|| non_empty("BRAPI_TOKEN")),
                base_url: non_empty("BRAPI_BASE_URL").unwrap_or(defaults.brapi.base_url),
                timeout_ms: parse_or("BRAPI_TIMEOUT_MS", defaults.brapi.timeout_ms),
                max_retries: parse_or("BRAPI_MAX_RETRIES", defaults.brapi.max_retries),
            },
            history_cache_ttl_ms: parse_or("HISTORY_CACHE_TTL_MS", defaults.history_cache_ttl_ms),
            analysis_cache_ttl_ms: parse_or("ANALYSIS_CACHE_TTL_MS", defaults.analysis_cache_ttl_ms),
            cache_max_entries: parse_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            max_symbols: parse_or("MAX_SYMBOLS", defaults.max_symbols),
            default_range: non_empty("DEFAULT_RANGE").unwrap_or(defaults.default_range),
            default_interval: non_empty("DEFAULT_INTERVAL").unwrap_or(defaults.default_interval),
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
        }
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut errors = Vec::new();
        if self.port == 0 {
            errors.push("PORT");
        }
        if self.brapi.timeout_ms == 0 {
            errors.push("BRAPI_TIMEOUT_MS");
        }
        if self.cache_max_entries == 0 {
            errors.push("CACHE_MAX_ENTRIES");
        }
        if self.max_symbols == 0 {
            errors.push("MAX_SYMBOLS");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Invalid configuration: {}", errors.join(", "))
        }
    }

    pub fn history_cache_policy(&self) -> CachePolicy {
        CachePolicy::new(
            Duration::from_millis(self.history_cache_ttl_ms),
            self.cache_max_entries,
        )
    }

    pub fn analysis_cache_policy(&self) -> CachePolicy {
        CachePolicy::new(
            Duration::from_millis(self.analysis_cache_ttl_ms),
            self.cache_max_entries,
        )
    }
}
