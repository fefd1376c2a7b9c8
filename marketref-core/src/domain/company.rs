//! Company profiles (raw provider payload) and the normalized record built from them.

use serde::{Deserialize, Serialize};

/// Company profile as returned by the provider's profile endpoint.
///
/// Every field is optional: the provider returns `{}` for symbols it has no
/// profile for, and individual fields are frequently missing for small caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub finnhub_industry: Option<String>,
    pub ipo: Option<String>,
    pub logo: Option<String>,
    /// Market capitalization in millions of the listing currency.
    pub market_capitalization: Option<f64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
}

impl CompanyProfile {
    /// True when the provider had no data at all for the symbol.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalized, fixed-shape record produced for every successfully fetched symbol.
///
/// Field names on the wire (CSV headers, JSON keys) follow the provider's
/// naming so downstream tooling can join against raw payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub symbol: String,
    pub industry: Option<String>,
    #[serde(rename = "marketCapitalization")]
    pub market_cap: f64,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub weburl: Option<String>,
}

impl CompanyRecord {
    /// Column order used by every tabular export of records.
    pub const COLUMNS: [&'static str; 6] = [
        "symbol",
        "industry",
        "marketCapitalization",
        "name",
        "exchange",
        "weburl",
    ];

    /// Build a record for `symbol` from its profile. A missing market cap becomes 0.
    pub fn from_profile(symbol: &str, profile: CompanyProfile) -> Self {
        Self {
            symbol: symbol.to_string(),
            industry: profile.finnhub_industry,
            market_cap: profile.market_capitalization.unwrap_or(0.0),
            name: profile.name,
            exchange: profile.exchange,
            weburl: profile.weburl,
        }
    }
}
