//! marketref runner: enrichment orchestration, checkpoints, exports, news ETL.
//!
//! This crate builds on `marketref-core` to provide:
//! - The batch enricher (sequential fetch, filter, accumulate, checkpoint)
//! - Periodic CSV + JSON checkpoints, resume, and the abort fallback
//! - The industry pipeline and the persisted keyword subset
//! - The news ETL writing a single Parquet snapshot
//! - TOML pipeline configuration

pub mod checkpoint;
pub mod config;
pub mod enrich;
pub mod export;
pub mod layout;
pub mod news;
pub mod pipeline;
pub mod progress;

pub use checkpoint::{CheckpointError, CheckpointPaths, CheckpointWriter, ResumePoint};
pub use config::{ConfigError, PipelineConfig, RateLimitConfig};
pub use enrich::{BatchEnricher, EnrichError, EnrichOutcome, EnrichState, FetchFailure};
pub use export::ExportError;
pub use layout::OutputLayout;
pub use news::{fetch_news, run_news_etl, DateWindow, NewsError, NewsSummary};
pub use pipeline::{filter_persisted, run_industry_pipeline, PipelineError, PipelineSummary};
pub use progress::{EnrichProgress, LogProgress};
