//! Progress callbacks for enrichment runs.

use crate::checkpoint::{CheckpointError, CheckpointPaths};
use marketref_core::{CompanyRecord, FetchError};

/// Observer for a batch enrichment run.
///
/// Positions are 1-based counts of symbols processed, matching checkpoint names.
pub trait EnrichProgress: Send {
    /// Called once before the first symbol. `resumed_from` is 0 for a fresh run.
    fn on_start(&self, total: usize, resumed_from: usize);

    /// Called after a successful fetch. `record` is `None` when the provider had no data.
    fn on_record(
        &self,
        position: usize,
        total: usize,
        symbol: &str,
        record: Option<&CompanyRecord>,
        kept: bool,
    );

    /// Called when a symbol's fetch failed and the run moves on.
    fn on_failure(&self, position: usize, total: usize, error: &FetchError);

    /// Called after each checkpoint attempt.
    fn on_checkpoint(&self, result: &Result<CheckpointPaths, CheckpointError>);

    /// Called when every symbol has been processed.
    fn on_complete(&self, retained: usize, failed: usize, total: usize);
}

/// Progress reporter that writes through `tracing`.
pub struct LogProgress;

impl EnrichProgress for LogProgress {
    fn on_start(&self, total: usize, resumed_from: usize) {
        if resumed_from > 0 {
            tracing::info!(total, resumed_from, "[INDUSTRY] resuming enrichment");
        } else {
            tracing::info!(total, "[INDUSTRY] fetching industries");
        }
    }

    fn on_record(
        &self,
        position: usize,
        total: usize,
        symbol: &str,
        record: Option<&CompanyRecord>,
        kept: bool,
    ) {
        match record {
            Some(r) => tracing::info!(
                "[INDUSTRY] {position}/{total}  {symbol} → cap={}, industry={}{}",
                r.market_cap,
                r.industry.as_deref().unwrap_or("None"),
                if kept { "" } else { " (dropped)" }
            ),
            None => tracing::info!("[INDUSTRY] {position}/{total}  {symbol} → no profile"),
        }
    }

    fn on_failure(&self, position: usize, total: usize, error: &FetchError) {
        tracing::warn!(
            position,
            total,
            symbol = %error.symbol,
            error = %error.source,
            "[ERROR] fetch failed, skipping"
        );
    }

    fn on_checkpoint(&self, result: &Result<CheckpointPaths, CheckpointError>) {
        // Failures are already logged by the enricher.
        if let Ok(paths) = result {
            tracing::info!(
                position = paths.position,
                csv = %paths.csv.display(),
                json = %paths.json.display(),
                "[SAVE] checkpoint written"
            );
        }
    }

    fn on_complete(&self, retained: usize, failed: usize, total: usize) {
        tracing::info!(
            retained,
            failed,
            total,
            "[INDUSTRY] completed fetching and filtering industries"
        );
    }
}
