//! Market-data client trait and structured error types.
//!
//! The `MarketDataClient` trait abstracts over the external service so the
//! pipeline can be driven by the Finnhub HTTP client in production and by
//! in-memory stubs in tests. The client is constructed once at startup and
//! passed by reference; nothing in the pipeline reaches for a global.

use crate::domain::{CompanyProfile, NewsItem, SymbolEntry};
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for provider calls.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("provider error: {0}")]
    Service(String),

    #[error("client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("parquet I/O error: {0}")]
    ParquetError(String),
}

impl DataError {
    /// Whether the error reflects the client as a whole rather than one symbol.
    ///
    /// A rejected credential or an unusable client will fail every remaining
    /// call, so batch callers abort instead of skipping to the next symbol.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DataError::AuthenticationRequired(_) | DataError::ClientUnavailable(_)
        )
    }
}

/// Capability over the external financial-data service.
///
/// Each method performs exactly one outbound call. Throttling is the caller's
/// responsibility.
pub trait MarketDataClient: Send + Sync {
    /// Human-readable name of this client.
    fn name(&self) -> &str;

    /// Company news for `symbol` published between `from` and `to` (inclusive).
    fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsItem>, DataError>;

    /// Every symbol listed on `exchange` (e.g. "US").
    fn stock_symbols(&self, exchange: &str) -> Result<Vec<SymbolEntry>, DataError>;

    /// Company profile for `symbol`. An empty profile means the provider has no data.
    fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, DataError>;
}
