//! Finnhub data client.
//!
//! Talks to Finnhub's REST API (`/company-news`, `/stock/symbol`,
//! `/stock/profile2`) over blocking HTTP. One method call is one request: no
//! retries and no sleeping happen here, the pipeline owns throttling.
//!
//! Finnhub reports some failures as HTTP status codes and others as a
//! `{"error": "..."}` body with status 200, so both paths are mapped onto
//! `DataError`.

use super::credentials::ApiCredential;
use super::provider::{DataError, MarketDataClient};
use crate::domain::{CompanyProfile, NewsItem, SymbolEntry};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Finnhub REST client.
pub struct FinnhubClient {
    client: reqwest::blocking::Client,
    credential: ApiCredential,
    base_url: String,
}

impl FinnhubClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://finnhub.io/api/v1";

    pub fn new(credential: ApiCredential) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("marketref/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::ClientUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            credential,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (proxies, sandboxes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one GET and return the parsed JSON body.
    fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<serde_json::Value, DataError> {
        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(%url, ?query, "finnhub request");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .header("X-Finnhub-Token", self.credential.expose())
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        let retry_after = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if let Some(err) = classify_status(status, retry_after.as_deref(), endpoint) {
            return Err(err);
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(format!("reading body from {endpoint}: {e}")))?;
        parse_body(endpoint, &body)
    }
}

impl MarketDataClient for FinnhubClient {
    fn name(&self) -> &str {
        "finnhub"
    }

    fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsItem>, DataError> {
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        let value = self.get_json(
            "/company-news",
            &[("symbol", symbol), ("from", &from), ("to", &to)],
        )?;
        decode("/company-news", value)
    }

    fn stock_symbols(&self, exchange: &str) -> Result<Vec<SymbolEntry>, DataError> {
        let value = self.get_json("/stock/symbol", &[("exchange", exchange)])?;
        decode("/stock/symbol", value)
    }

    fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, DataError> {
        let value = self.get_json("/stock/profile2", &[("symbol", symbol)])?;
        if value.is_null() {
            return Ok(CompanyProfile::default());
        }
        decode("/stock/profile2", value)
    }
}

/// Map a non-success HTTP status onto a `DataError`. `None` means success.
fn classify_status(status: StatusCode, retry_after: Option<&str>, endpoint: &str) -> Option<DataError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = retry_after.and_then(|v| v.trim().parse().ok()).unwrap_or(60);
        return Some(DataError::RateLimited { retry_after_secs });
    }
    // 403 is per resource (plan-gated) and falls through to `Http`.
    if status == StatusCode::UNAUTHORIZED {
        return Some(DataError::AuthenticationRequired(format!(
            "HTTP 401 from {endpoint} (check FINNHUB_KEY)"
        )));
    }
    if !status.is_success() {
        return Some(DataError::Http {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        });
    }
    None
}

/// Parse a response body, surfacing Finnhub's in-band `{"error": ...}` payloads.
fn parse_body(endpoint: &str, body: &str) -> Result<serde_json::Value, DataError> {
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        DataError::ResponseFormatChanged(format!("invalid JSON from {endpoint}: {e}"))
    })?;

    if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
        if msg.to_ascii_lowercase().contains("api limit") {
            return Err(DataError::RateLimited {
                retry_after_secs: 60,
            });
        }
        return Err(DataError::Service(msg.to_string()));
    }
    Ok(value)
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: serde_json::Value) -> Result<T, DataError> {
    serde_json::from_value(value).map_err(|e| {
        DataError::ResponseFormatChanged(format!("unexpected payload from {endpoint}: {e}"))
    })
}
