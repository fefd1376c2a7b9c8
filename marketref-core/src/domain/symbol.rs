//! Exchange symbol list entries.

use serde::{Deserialize, Serialize};

/// One row of an exchange's symbol list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEntry {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_symbol: Option<String>,
    #[serde(default)]
    pub figi: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub mic: Option<String>,
    #[serde(default, rename = "shareClassFIGI")]
    pub share_class_figi: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub symbol2: Option<String>,
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
}

impl SymbolEntry {
    pub const COLUMNS: [&'static str; 10] = [
        "currency",
        "description",
        "displaySymbol",
        "figi",
        "isin",
        "mic",
        "shareClassFIGI",
        "symbol",
        "symbol2",
        "type",
    ];

    /// Minimal entry carrying only a ticker.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            currency: None,
            description: None,
            display_symbol: None,
            figi: None,
            isin: None,
            mic: None,
            share_class_figi: None,
            symbol: symbol.into(),
            symbol2: None,
            security_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbol_list_row() {
        let json = r#"{
            "currency": "USD",
            "description": "APPLE INC",
            "displaySymbol": "AAPL",
            "figi": "BBG000B9XRY4",
            "isin": null,
            "mic": "XNAS",
            "shareClassFIGI": "BBG001S5N8V8",
            "symbol": "AAPL",
            "symbol2": "",
            "type": "Common Stock"
        }"#;
        let entry: SymbolEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.display_symbol.as_deref(), Some("AAPL"));
        assert_eq!(entry.share_class_figi.as_deref(), Some("BBG001S5N8V8"));
        assert_eq!(entry.security_type.as_deref(), Some("Common Stock"));
        assert!(entry.isin.is_none());
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let entry: SymbolEntry = serde_json::from_str(r#"{"symbol": "ZZZ"}"#).unwrap();
        assert_eq!(entry, SymbolEntry::new("ZZZ"));
    }
}
