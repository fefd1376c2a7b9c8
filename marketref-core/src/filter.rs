//! Record filters.
//!
//! Filters are pure: they look at one record and return a verdict. The
//! market-cap filter runs per record during enrichment; the industry keyword
//! filter runs afterwards over an already-persisted retained set.

use crate::domain::CompanyRecord;

/// Default market-cap threshold (same units as the provider's `marketCapitalization`).
pub const DEFAULT_MIN_MARKET_CAP: f64 = 2_000_000.0;

/// Default industry keywords for the healthcare subset.
pub const DEFAULT_HEALTHCARE_KEYWORDS: [&str; 4] = ["health", "pharma", "biotech", "medical"];

/// Trait for record filters.
pub trait RecordFilter: Send + Sync {
    /// Human-readable name (e.g., "market_cap", "industry_keywords").
    fn name(&self) -> &str;

    /// Whether `record` is retained.
    fn keep(&self, record: &CompanyRecord) -> bool;

    /// Retained records in their original order.
    fn select(&self, records: &[CompanyRecord]) -> Vec<CompanyRecord> {
        records.iter().filter(|r| self.keep(r)).cloned().collect()
    }
}

/// Keeps records whose market cap is at or above a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketCapFilter {
    min_market_cap: f64,
}

impl MarketCapFilter {
    pub fn new(min_market_cap: f64) -> Self {
        Self { min_market_cap }
    }

    pub fn threshold(&self) -> f64 {
        self.min_market_cap
    }
}

impl Default for MarketCapFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MARKET_CAP)
    }
}

impl RecordFilter for MarketCapFilter {
    fn name(&self) -> &str {
        "market_cap"
    }

    fn keep(&self, record: &CompanyRecord) -> bool {
        record.market_cap >= self.min_market_cap
    }
}

/// Keeps records whose industry label contains any keyword, case-insensitively.
///
/// Records without an industry are never kept. Blank keywords are ignored, so
/// an empty keyword set keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryKeywordFilter {
    keywords: Vec<String>,
}

impl IndustryKeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Healthcare keywords: health, pharma, biotech, medical.
    pub fn healthcare() -> Self {
        Self::new(DEFAULT_HEALTHCARE_KEYWORDS)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl RecordFilter for IndustryKeywordFilter {
    fn name(&self) -> &str {
        "industry_keywords"
    }

    fn keep(&self, record: &CompanyRecord) -> bool {
        let Some(industry) = record.industry.as_deref() else {
            return false;
        };
        let industry = industry.to_lowercase();
        self.keywords.iter().any(|k| industry.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, market_cap: f64, industry: Option<&str>) -> CompanyRecord {
        CompanyRecord {
            symbol: symbol.into(),
            industry: industry.map(String::from),
            market_cap,
            name: None,
            exchange: None,
            weburl: None,
        }
    }

    #[test]
    fn market_cap_boundary_is_retained() {
        let filter = MarketCapFilter::default();
        assert!(filter.keep(&record("EQ", 2_000_000.0, None)));
        assert!(filter.keep(&record("ABOVE", 5_000_000.0, None)));
        assert!(!filter.keep(&record("BELOW", 1_999_999.99, None)));
        assert!(!filter.keep(&record("ZERO", 0.0, None)));
    }

    #[test]
    fn nan_market_cap_is_dropped() {
        assert!(!MarketCapFilter::default().keep(&record("NAN", f64::NAN, None)));
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let filter = IndustryKeywordFilter::healthcare();
        assert!(filter.keep(&record("A", 0.0, Some("Biotechnology"))));
        assert!(filter.keep(&record("B", 0.0, Some("PHARMACEUTICALS"))));
        assert!(filter.keep(&record("C", 0.0, Some("Health Care"))));
        assert!(filter.keep(&record("D", 0.0, Some("Medical Devices"))));
        assert!(!filter.keep(&record("E", 0.0, Some("Retail"))));
    }

    #[test]
    fn missing_industry_is_excluded() {
        assert!(!IndustryKeywordFilter::healthcare().keep(&record("N", 0.0, None)));
    }

    #[test]
    fn keywords_are_normalized() {
        let filter = IndustryKeywordFilter::new(["  Pharma ", "", "   "]);
        assert_eq!(filter.keywords(), ["pharma".to_string()]);
        assert!(!IndustryKeywordFilter::new(Vec::<String>::new()).keep(&record("X", 0.0, Some("Pharma"))));
    }

    #[test]
    fn select_preserves_order() {
        let records = vec![
            record("AAA", 5_000_000.0, Some("Biotechnology")),
            record("BBB", 1_000_000.0, Some("Pharmaceuticals")),
            record("CCC", 2_000_000.0, Some("Retail")),
        ];
        let kept: Vec<String> = MarketCapFilter::default()
            .select(&records)
            .into_iter()
            .map(|r| r.symbol)
            .collect();
        assert_eq!(kept, ["AAA", "CCC"]);
    }
}
