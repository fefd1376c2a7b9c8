//! Industry pipeline: symbol list → enrichment → retained set → keyword subset.
//!
//! ```text
//! stock_symbols(exchange) ──► all_{exchange}_symbols.{csv,json}
//!        │
//!        ▼
//! BatchEnricher (profile per symbol, market-cap filter, checkpoints)
//!        │
//!        ▼
//! symbols_industry.{csv,json} ──► healthcare_symbols.csv
//! ```
//!
//! The keyword subset is always derived from the persisted retained set, so
//! `filter_persisted` can be re-run on its own without touching the network.

use crate::checkpoint::{CheckpointError, ResumePoint};
use crate::config::{ConfigError, PipelineConfig};
use crate::enrich::{BatchEnricher, EnrichError, EnrichOutcome};
use crate::export::{self, ExportError};
use crate::layout::OutputLayout;
use crate::progress::EnrichProgress;
use marketref_core::{
    CompanyRecord, DataError, IndustryKeywordFilter, MarketDataClient, RecordFilter, SymbolEntry,
};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch symbol list for {exchange}: {source}")]
    SymbolList {
        exchange: String,
        #[source]
        source: DataError,
    },

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),
}

/// What an industry run produced.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub symbols: usize,
    pub retained: usize,
    pub failed: usize,
    /// Symbols skipped because a checkpoint already covered them.
    pub resumed_from: usize,
    pub healthcare: usize,
    pub industry_csv: PathBuf,
    pub healthcare_csv: PathBuf,
}

/// Run the full industry pipeline against `client`.
///
/// With `resume`, the newest checkpoint in the output directory seeds the run.
pub fn run_industry_pipeline(
    client: &dyn MarketDataClient,
    config: &PipelineConfig,
    progress: &dyn EnrichProgress,
    resume: bool,
) -> Result<PipelineSummary, PipelineError> {
    let layout = config.layout();
    ensure_dir(&layout)?;
    let limiter = config.rate_limit.limiter()?;

    tracing::info!(exchange = %config.exchange, "[SYMBOLS] fetching symbol list");
    let entries = client
        .stock_symbols(&config.exchange)
        .map_err(|source| PipelineError::SymbolList {
            exchange: config.exchange.clone(),
            source,
        })?;
    export::write_csv(&layout.symbols_csv(&config.exchange), &entries, &SymbolEntry::COLUMNS)?;
    export::write_json(&layout.symbols_json(&config.exchange), &entries)?;
    tracing::info!(count = entries.len(), "[SYMBOLS] saved symbol list");
    limiter.wait();

    let symbols: Vec<String> = entries.into_iter().map(|e| e.symbol).collect();

    let checkpoints = config.checkpoint_writer();
    let start = if resume {
        checkpoints.latest()?.unwrap_or_default()
    } else {
        ResumePoint::default()
    };
    let resumed_from = start.processed.min(symbols.len());

    let filter = config.market_cap_filter();
    let mut enricher = BatchEnricher::new(client, &filter, limiter, checkpoints, progress);
    let EnrichOutcome {
        records, failures, ..
    } = enricher.run_resumed(&symbols, start)?;

    let industry_csv = layout.industry_csv();
    export::write_csv(&industry_csv, &records, &CompanyRecord::COLUMNS)?;
    export::write_json(&layout.industry_json(), &records)?;

    let (healthcare, healthcare_csv) = filter_persisted(&layout, &config.keyword_filter())?;

    Ok(PipelineSummary {
        symbols: symbols.len(),
        retained: records.len(),
        failed: failures.len(),
        resumed_from,
        healthcare,
        industry_csv,
        healthcare_csv,
    })
}

/// Re-read `symbols_industry.csv`, keep keyword matches, write `healthcare_symbols.csv`.
pub fn filter_persisted(
    layout: &OutputLayout,
    filter: &IndustryKeywordFilter,
) -> Result<(usize, PathBuf), PipelineError> {
    let records: Vec<CompanyRecord> = export::read_csv(&layout.industry_csv())?;
    let subset = filter.select(&records);

    let path = layout.healthcare_csv();
    export::write_csv(&path, &subset, &CompanyRecord::COLUMNS)?;
    tracing::info!(
        kept = subset.len(),
        of = records.len(),
        keywords = ?filter.keywords(),
        "[FILTER] keyword subset written"
    );
    Ok((subset.len(), path))
}

fn ensure_dir(layout: &OutputLayout) -> Result<(), PipelineError> {
    layout.ensure().map_err(|source| PipelineError::OutputDir {
        path: layout.root().to_path_buf(),
        source,
    })
}
