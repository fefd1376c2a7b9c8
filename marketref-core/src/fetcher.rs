//! Per-symbol record fetcher.
//!
//! One call to `fetch` is one profile request. Failures are returned to the
//! caller as `FetchError`; whether a failure skips the symbol or ends the
//! batch is the orchestrator's decision, not this layer's.

use crate::data::{DataError, MarketDataClient};
use crate::domain::CompanyRecord;
use thiserror::Error;

/// A failed profile fetch for one symbol.
#[derive(Debug, Clone, Error)]
#[error("{symbol}: {source}")]
pub struct FetchError {
    pub symbol: String,
    #[source]
    pub source: DataError,
}

impl FetchError {
    pub fn new(symbol: impl Into<String>, source: DataError) -> Self {
        Self {
            symbol: symbol.into(),
            source,
        }
    }

    /// True when the underlying error affects the client rather than this symbol.
    pub fn is_fatal(&self) -> bool {
        self.source.is_fatal()
    }
}

/// Maps provider profiles to normalized records.
pub struct RecordFetcher<'a> {
    client: &'a dyn MarketDataClient,
}

impl<'a> RecordFetcher<'a> {
    pub fn new(client: &'a dyn MarketDataClient) -> Self {
        Self { client }
    }

    /// Fetch and normalize the profile for `symbol`.
    ///
    /// Returns `Ok(None)` when the provider has no profile for the symbol.
    pub fn fetch(&self, symbol: &str) -> Result<Option<CompanyRecord>, FetchError> {
        let profile = self
            .client
            .company_profile(symbol)
            .map_err(|e| FetchError::new(symbol, e))?;

        if profile.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompanyRecord::from_profile(symbol, profile)))
    }
}
