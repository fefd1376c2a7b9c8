//! Market-data access: provider capability, Finnhub client, credentials, news storage.

pub mod credentials;
pub mod finnhub;
pub mod news_table;
pub mod provider;

pub use credentials::{ApiCredential, CredentialError, API_KEY_VAR};
pub use finnhub::FinnhubClient;
pub use news_table::{news_to_dataframe, write_news_parquet};
pub use provider::{DataError, MarketDataClient};
