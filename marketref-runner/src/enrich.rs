//! Batch enricher: drives a symbol list through fetch, filter, accumulate and checkpoint.
//!
//! Execution is strictly sequential. For each symbol, in input order:
//! 1. Fetch the profile (one provider call)
//! 2. Keep the record if the filter accepts it
//! 3. Sleep the rate-limit delay
//! 4. Snapshot the accumulator if the checkpoint cadence is due
//!
//! A per-symbol fetch failure is recorded and skipped. A client-wide failure
//! (rejected credential, unusable client) aborts the run: the accumulator is
//! flushed once to the fallback file, then the original error is returned.
//!
//! State machine: `Idle → Running → {Completed, Aborted}`. An enricher runs once.

use crate::checkpoint::{CheckpointPaths, CheckpointWriter, ResumePoint};
use crate::progress::EnrichProgress;
use marketref_core::{
    CompanyRecord, FetchError, MarketDataClient, RateLimiter, RecordFetcher, RecordFilter,
};
use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle of a batch enricher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichState {
    Idle,
    Running,
    Completed,
    Aborted,
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("enrichment aborted at {position}/{total}: {source}")]
    Fatal {
        position: usize,
        total: usize,
        /// Records retained before the failure; all of them are in `fallback`.
        retained: usize,
        /// Fallback file, if the flush itself succeeded.
        fallback: Option<PathBuf>,
        #[source]
        source: FetchError,
    },

    #[error("enricher cannot start from state {0:?}")]
    InvalidState(EnrichState),
}

/// A symbol that was skipped because its fetch failed.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub position: usize,
    pub error: FetchError,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    /// Retained records, in input order.
    pub records: Vec<CompanyRecord>,
    /// Symbols processed, including any skipped by a resume.
    pub processed: usize,
    pub failures: Vec<FetchFailure>,
    pub checkpoints: Vec<CheckpointPaths>,
}

/// Sequential, rate-limited, checkpointing enrichment loop.
pub struct BatchEnricher<'a> {
    fetcher: RecordFetcher<'a>,
    filter: &'a dyn RecordFilter,
    limiter: RateLimiter,
    checkpoints: CheckpointWriter,
    progress: &'a dyn EnrichProgress,
    state: EnrichState,
}

impl<'a> BatchEnricher<'a> {
    pub fn new(
        client: &'a dyn MarketDataClient,
        filter: &'a dyn RecordFilter,
        limiter: RateLimiter,
        checkpoints: CheckpointWriter,
        progress: &'a dyn EnrichProgress,
    ) -> Self {
        Self {
            fetcher: RecordFetcher::new(client),
            filter,
            limiter,
            checkpoints,
            progress,
            state: EnrichState::Idle,
        }
    }

    pub fn state(&self) -> EnrichState {
        self.state
    }

    /// Enrich `symbols` from the beginning.
    pub fn run(&mut self, symbols: &[String]) -> Result<EnrichOutcome, EnrichError> {
        self.run_resumed(symbols, ResumePoint::default())
    }

    /// Enrich `symbols`, skipping the first `resume.processed` and seeding the
    /// accumulator with `resume.records`. Positions stay global, so checkpoint
    /// names line up with a fresh run over the same list.
    pub fn run_resumed(
        &mut self,
        symbols: &[String],
        resume: ResumePoint,
    ) -> Result<EnrichOutcome, EnrichError> {
        if self.state != EnrichState::Idle {
            return Err(EnrichError::InvalidState(self.state));
        }
        self.state = EnrichState::Running;

        let total = symbols.len();
        let start = resume.processed.min(total);
        let mut records = resume.records;
        let mut failures = Vec::new();
        let mut checkpoints = Vec::new();

        self.progress.on_start(total, start);

        for (offset, symbol) in symbols[start..].iter().enumerate() {
            let position = start + offset + 1;

            match self.fetcher.fetch(symbol) {
                Ok(Some(record)) => {
                    let kept = self.filter.keep(&record);
                    self.progress
                        .on_record(position, total, symbol, Some(&record), kept);
                    if kept {
                        records.push(record);
                    }
                }
                Ok(None) => self.progress.on_record(position, total, symbol, None, false),
                Err(error) if error.is_fatal() => {
                    return Err(self.abort(position, total, &records, error));
                }
                Err(error) => {
                    self.progress.on_failure(position, total, &error);
                    failures.push(FetchFailure { position, error });
                }
            }

            self.limiter.wait();

            if self.checkpoints.is_due(position) {
                let result = self.checkpoints.snapshot(&records, position);
                if let Err(e) = &result {
                    tracing::warn!(position, error = %e, "[SAVE] checkpoint failed, continuing");
                }
                self.progress.on_checkpoint(&result);
                if let Ok(paths) = result {
                    checkpoints.push(paths);
                }
            }
        }

        self.state = EnrichState::Completed;
        self.progress
            .on_complete(records.len(), failures.len(), total);

        Ok(EnrichOutcome {
            records,
            processed: total,
            failures,
            checkpoints,
        })
    }

    /// Transition to `Aborted`: one best-effort fallback flush, then hand back the error.
    fn abort(
        &mut self,
        position: usize,
        total: usize,
        records: &[CompanyRecord],
        source: FetchError,
    ) -> EnrichError {
        self.state = EnrichState::Aborted;
        tracing::error!(
            position,
            total,
            symbol = %source.symbol,
            error = %source.source,
            "[FATAL] error during industry fetch"
        );

        let fallback_path = self.checkpoints.layout().fallback_csv();
        tracing::warn!(
            path = %fallback_path.display(),
            records = records.len(),
            "[SAVE] writing fallback results"
        );
        let fallback = match self.checkpoints.flush_fallback(records) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(error = %e, "[SAVE] fallback flush failed");
                None
            }
        };

        EnrichError::Fatal {
            position,
            total,
            retained: records.len(),
            fallback,
            source,
        }
    }
}
