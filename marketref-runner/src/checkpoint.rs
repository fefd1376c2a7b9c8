//! Checkpoints for long enrichment runs.
//!
//! Every `cadence` symbols the retained records so far are written as a CSV +
//! JSON pair named with the number of symbols processed. Each pair is a
//! complete snapshot; pairs are never merged or deleted. A failed snapshot is
//! reported to the caller, who logs it and carries on: checkpoints protect
//! against crashes, they are not part of the run's result.
//!
//! The same writer owns the fallback file written once when a run aborts, and
//! can locate the newest checkpoint to resume from.

use crate::export::{self, ExportError};
use crate::layout::OutputLayout;
use marketref_core::CompanyRecord;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default number of symbols between checkpoints.
pub const DEFAULT_CHECKPOINT_EVERY: usize = 500;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint at position {position} failed: {source}")]
    Write {
        position: usize,
        #[source]
        source: ExportError,
    },

    #[error("fallback flush failed: {0}")]
    Fallback(#[source] ExportError),

    #[error("failed to scan {} for checkpoints: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load checkpoint: {0}")]
    Load(#[source] ExportError),
}

/// Paths of one written checkpoint pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointPaths {
    pub position: usize,
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// State recovered from a checkpoint: how many symbols were processed and
/// which records had been retained by then.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumePoint {
    pub processed: usize,
    pub records: Vec<CompanyRecord>,
}

/// Writes periodic snapshots and the abort fallback.
#[derive(Debug, Clone)]
pub struct CheckpointWriter {
    layout: OutputLayout,
    cadence: usize,
}

impl CheckpointWriter {
    /// `cadence` of 0 disables periodic snapshots.
    pub fn new(layout: OutputLayout, cadence: usize) -> Self {
        Self { layout, cadence }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Whether a snapshot is due after processing `position` symbols (1-based).
    pub fn is_due(&self, position: usize) -> bool {
        self.cadence != 0 && position != 0 && position % self.cadence == 0
    }

    /// Write `records` as the checkpoint for `position`.
    pub fn snapshot(
        &self,
        records: &[CompanyRecord],
        position: usize,
    ) -> Result<CheckpointPaths, CheckpointError> {
        let paths = CheckpointPaths {
            position,
            csv: self.layout.checkpoint_csv(position),
            json: self.layout.checkpoint_json(position),
        };
        let wrap = |source| CheckpointError::Write { position, source };

        export::write_csv(&paths.csv, records, &CompanyRecord::COLUMNS).map_err(wrap)?;
        export::write_json(&paths.json, records).map_err(wrap)?;
        Ok(paths)
    }

    /// Write the last-resort fallback CSV.
    pub fn flush_fallback(&self, records: &[CompanyRecord]) -> Result<PathBuf, CheckpointError> {
        let path = self.layout.fallback_csv();
        export::write_csv(&path, records, &CompanyRecord::COLUMNS)
            .map_err(CheckpointError::Fallback)?;
        Ok(path)
    }

    /// Position of the newest checkpoint CSV in the output root, if any.
    pub fn latest_position(&self) -> Result<Option<usize>, CheckpointError> {
        let dir = self.layout.root();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CheckpointError::Scan {
                    dir: dir.to_path_buf(),
                    source,
                })
            }
        };

        let mut latest = None;
        for entry in entries {
            let entry = entry.map_err(|source| CheckpointError::Scan {
                dir: dir.to_path_buf(),
                source,
            })?;
            let name = entry.file_name();
            if let Some(position) = OutputLayout::checkpoint_position(&name.to_string_lossy()) {
                latest = latest.max(Some(position));
            }
        }
        Ok(latest)
    }

    /// Load the newest checkpoint as a resume point.
    pub fn latest(&self) -> Result<Option<ResumePoint>, CheckpointError> {
        let Some(position) = self.latest_position()? else {
            return Ok(None);
        };
        let records = export::read_csv(&self.layout.checkpoint_csv(position))
            .map_err(CheckpointError::Load)?;
        Ok(Some(ResumePoint {
            processed: position,
            records,
        }))
    }
}
