//! News ETL: company news for a ticker list over a date window, one Parquet file.

use crate::layout::OutputLayout;
use chrono::{Days, NaiveDate, Utc};
use marketref_core::data::write_news_parquet;
use marketref_core::{DataError, MarketDataClient, NewsRow, RateLimiter};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("failed to fetch news for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write news snapshot: {0}")]
    Write(#[source] DataError),

    #[error("a {days}-day lookback from {end} is outside the supported date range")]
    Window { end: NaiveDate, days: u32 },
}

/// Inclusive date range sent to the news endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// The `days` days ending at `end`.
    pub fn lookback(end: NaiveDate, days: u32) -> Result<Self, NewsError> {
        let from = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or(NewsError::Window { end, days })?;
        Ok(Self { from, to: end })
    }

    /// The `days` days ending today (UTC).
    pub fn ending_today(days: u32) -> Result<Self, NewsError> {
        Self::lookback(Utc::now().date_naive(), days)
    }

    pub fn from_iso(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    pub fn to_iso(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

/// Result of a news run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSummary {
    pub items: usize,
    pub path: PathBuf,
}

/// Fetch one ticker's news and tag every item with the ticker.
pub fn fetch_news(
    client: &dyn MarketDataClient,
    symbol: &str,
    window: DateWindow,
    limiter: &RateLimiter,
) -> Result<Vec<NewsRow>, NewsError> {
    tracing::info!(
        symbol,
        from = %window.from_iso(),
        to = %window.to_iso(),
        "[NEWS] fetching company news"
    );
    let items = client
        .company_news(symbol, window.from, window.to)
        .map_err(|source| NewsError::Fetch {
            symbol: symbol.to_string(),
            source,
        })?;
    limiter.wait();

    Ok(items.into_iter().map(|item| NewsRow::new(symbol, item)).collect())
}

/// Fetch news for every ticker and write one `news.parquet`.
///
/// An empty ticker list is a no-op: no calls, no files, `Ok(None)`.
pub fn run_news_etl(
    client: &dyn MarketDataClient,
    tickers: &[String],
    window: DateWindow,
    layout: &OutputLayout,
    limiter: &RateLimiter,
) -> Result<Option<NewsSummary>, NewsError> {
    if tickers.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::new();
    for symbol in tickers {
        rows.extend(fetch_news(client, symbol, window, limiter)?);
    }

    layout.ensure().map_err(|source| NewsError::OutputDir {
        path: layout.root().to_path_buf(),
        source,
    })?;
    let path = layout.news_parquet();
    tracing::info!(path = %path.display(), rows = rows.len(), "[SAVE] writing news snapshot");
    let items = write_news_parquet(&path, &rows).map_err(NewsError::Write)?;

    Ok(Some(NewsSummary { items, path }))
}
