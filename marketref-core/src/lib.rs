//! marketref core: domain types, market-data client, throttling, fetching and filtering.
//!
//! This crate holds everything the enrichment pipeline needs below the
//! orchestration layer:
//! - Domain types (company profiles and records, exchange symbols, news items)
//! - The `MarketDataClient` capability and its Finnhub HTTP implementation
//! - A fixed-delay rate limiter sized to the provider's ceilings
//! - The per-symbol record fetcher
//! - Record filters (market-cap threshold, industry keywords)
//! - The news Parquet table

pub mod data;
pub mod domain;
pub mod fetcher;
pub mod filter;
pub mod rate_limit;

pub use data::{ApiCredential, CredentialError, DataError, FinnhubClient, MarketDataClient};
pub use domain::{CompanyProfile, CompanyRecord, NewsItem, NewsRow, SymbolEntry};
pub use fetcher::{FetchError, RecordFetcher};
pub use filter::{IndustryKeywordFilter, MarketCapFilter, RecordFilter};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across the runner boundary are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<CompanyRecord>();
        require_sync::<CompanyRecord>();
        require_send::<CompanyProfile>();
        require_sync::<CompanyProfile>();
        require_send::<SymbolEntry>();
        require_sync::<SymbolEntry>();
        require_send::<NewsRow>();
        require_sync::<NewsRow>();

        require_send::<DataError>();
        require_sync::<DataError>();
        require_send::<FetchError>();
        require_sync::<FetchError>();

        require_send::<RateLimiter>();
        require_sync::<RateLimiter>();
        require_send::<MarketCapFilter>();
        require_sync::<MarketCapFilter>();
        require_send::<IndustryKeywordFilter>();
        require_sync::<IndustryKeywordFilter>();

        // The fetcher only needs a borrowed client, so a trait object must do.
        fn _fetcher_from_trait_object(client: &dyn MarketDataClient) -> RecordFetcher<'_> {
            RecordFetcher::new(client)
        }
    }
}
