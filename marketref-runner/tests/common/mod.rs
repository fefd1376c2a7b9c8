//! In-memory market-data client shared by the runner integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use marketref_core::{CompanyProfile, DataError, MarketDataClient, NewsItem, SymbolEntry};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned responses and records every call it receives.
#[derive(Default)]
pub struct StubClient {
    pub symbols: Vec<SymbolEntry>,
    pub profiles: HashMap<String, Result<CompanyProfile, DataError>>,
    pub news: HashMap<String, Vec<NewsItem>>,
    calls: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| SymbolEntry::new(*s)).collect();
        self
    }

    pub fn with_profile(mut self, symbol: &str, industry: &str, market_cap: f64) -> Self {
        let profile = CompanyProfile {
            finnhub_industry: Some(industry.to_string()),
            market_capitalization: Some(market_cap),
            name: Some(format!("{symbol} Inc")),
            ..Default::default()
        };
        self.profiles.insert(symbol.to_string(), Ok(profile));
        self
    }

    pub fn with_error(mut self, symbol: &str, error: DataError) -> Self {
        self.profiles.insert(symbol.to_string(), Err(error));
        self
    }

    pub fn with_news(mut self, symbol: &str, items: Vec<NewsItem>) -> Self {
        self.news.insert(symbol.to_string(), items);
        self
    }

    /// Every call so far, as `endpoint:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn profile_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("profile:").map(str::to_owned))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MarketDataClient for StubClient {
    fn name(&self) -> &str {
        "stub"
    }

    fn company_news(
        &self,
        symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<NewsItem>, DataError> {
        self.record(format!("news:{symbol}"));
        Ok(self.news.get(symbol).cloned().unwrap_or_default())
    }

    fn stock_symbols(&self, exchange: &str) -> Result<Vec<SymbolEntry>, DataError> {
        self.record(format!("symbols:{exchange}"));
        Ok(self.symbols.clone())
    }

    fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, DataError> {
        self.record(format!("profile:{symbol}"));
        self.profiles
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| Ok(CompanyProfile::default()))
    }
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
