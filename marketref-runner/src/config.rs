//! Pipeline configuration.
//!
//! Loaded from an optional TOML file. Every field has a default matching the
//! provider's free tier, so an empty file (or no file) is a valid config.

use crate::checkpoint::{CheckpointWriter, DEFAULT_CHECKPOINT_EVERY};
use crate::layout::OutputLayout;
use marketref_core::filter::{DEFAULT_HEALTHCARE_KEYWORDS, DEFAULT_MIN_MARKET_CAP};
use marketref_core::rate_limit::{FINNHUB_CALLS_PER_MINUTE, FINNHUB_CALLS_PER_SECOND};
use marketref_core::{IndustryKeywordFilter, MarketCapFilter, RateLimiter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest news lookback accepted from a config file.
pub const MAX_NEWS_LOOKBACK_DAYS: u32 = 36_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Throttling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub calls_per_second: u32,
    pub calls_per_minute: u32,
    /// Explicit delay in seconds; overrides the ceilings when set.
    pub delay_secs: Option<f64>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            calls_per_second: FINNHUB_CALLS_PER_SECOND,
            calls_per_minute: FINNHUB_CALLS_PER_MINUTE,
            delay_secs: None,
        }
    }
}

impl RateLimitConfig {
    pub fn limiter(&self) -> Result<RateLimiter, ConfigError> {
        match self.delay_secs {
            Some(secs) => {
                RateLimiter::from_secs_f64(secs).map_err(|e| ConfigError::Invalid(e.to_string()))
            }
            None => Ok(RateLimiter::for_ceilings(
                self.calls_per_second,
                self.calls_per_minute,
            )),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub exchange: String,
    /// Symbols between checkpoints; 0 disables checkpoints.
    pub checkpoint_every: usize,
    pub min_market_cap: f64,
    pub industry_keywords: Vec<String>,
    pub news_lookback_days: u32,
    pub rate_limit: RateLimitConfig,
    /// Override for the provider's API root.
    pub base_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            exchange: "US".to_string(),
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            industry_keywords: DEFAULT_HEALTHCARE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            news_lookback_days: 365,
            rate_limit: RateLimitConfig::default(),
            base_url: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange.trim().is_empty() {
            return Err(ConfigError::Invalid("exchange must not be empty".into()));
        }
        if !self.min_market_cap.is_finite() || self.min_market_cap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_market_cap must be a non-negative number (got {})",
                self.min_market_cap
            )));
        }
        if self.news_lookback_days > MAX_NEWS_LOOKBACK_DAYS {
            return Err(ConfigError::Invalid(format!(
                "news_lookback_days must be at most {MAX_NEWS_LOOKBACK_DAYS} (got {})",
                self.news_lookback_days
            )));
        }
        self.rate_limit.limiter()?;
        Ok(())
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }

    pub fn market_cap_filter(&self) -> MarketCapFilter {
        MarketCapFilter::new(self.min_market_cap)
    }

    pub fn keyword_filter(&self) -> IndustryKeywordFilter {
        IndustryKeywordFilter::new(&self.industry_keywords)
    }

    pub fn checkpoint_writer(&self) -> CheckpointWriter {
        CheckpointWriter::new(self.layout(), self.checkpoint_every)
    }
}
