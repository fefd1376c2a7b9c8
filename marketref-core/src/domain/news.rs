//! Company news items.

use serde::{Deserialize, Serialize};

/// A single news item from the provider's company-news endpoint.
///
/// The provider's payload varies between items, so every field is optional
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub category: Option<String>,
    /// Publication time, unix seconds.
    pub datetime: Option<i64>,
    pub headline: Option<String>,
    pub id: Option<i64>,
    pub image: Option<String>,
    pub related: Option<String>,
    pub source: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

/// A news item tagged with the symbol it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRow {
    pub symbol: String,
    #[serde(flatten)]
    pub item: NewsItem,
}

impl NewsRow {
    pub fn new(symbol: impl Into<String>, item: NewsItem) -> Self {
        Self {
            symbol: symbol.into(),
            item,
        }
    }
}
