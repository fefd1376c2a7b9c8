//! Tabular export: CSV and JSON files with identical logical content.
//!
//! Rows are serialized through serde, so the CSV header and the JSON keys come
//! from the same field names. An empty row set still produces a header-only
//! CSV and an empty JSON array. Files are written atomically: rendered in
//! memory, written to `{path}.tmp`, renamed into place.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error for {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error for {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `rows` as CSV. `columns` is only used for the header of an empty file.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T], columns: &[&str]) -> Result<(), ExportError> {
    tracing::info!(path = %path.display(), rows = rows.len(), "[SAVE] writing CSV");
    let bytes = render_csv(rows, columns).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &bytes)
}

/// Write `rows` as a pretty-printed JSON array of records.
pub fn write_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    tracing::info!(path = %path.display(), rows = rows.len(), "[SAVE] writing JSON");
    let json = serde_json::to_string_pretty(rows).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, json.as_bytes())
}

/// Read a CSV written by `write_csv`.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    rdr.deserialize().collect::<Result<Vec<T>, _>>().map_err(csv_err)
}

/// Read a JSON array written by `write_json`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn render_csv<T: Serialize>(rows: &[T], columns: &[&str]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if rows.is_empty() {
        wtr.write_record(columns)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);

    fs::write(&tmp_path, bytes).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_err(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketref_core::{CompanyRecord, SymbolEntry};

    fn records() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord {
                symbol: "AAA".into(),
                industry: Some("Biotechnology".into()),
                market_cap: 5_000_000.0,
                name: Some("Acme, Bio \"Labs\"".into()),
                exchange: Some("NASDAQ".into()),
                weburl: Some("https://acme.example".into()),
            },
            CompanyRecord {
                symbol: "CCC".into(),
                industry: None,
                market_cap: 2_000_000.0,
                name: None,
                exchange: None,
                weburl: None,
            },
        ]
    }

    #[test]
    fn csv_and_json_hold_the_same_rows() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("r.csv");
        let json_path = dir.path().join("r.json");

        write_csv(&csv_path, &records(), &CompanyRecord::COLUMNS).unwrap();
        write_json(&json_path, &records()).unwrap();

        let from_csv: Vec<CompanyRecord> = read_csv(&csv_path).unwrap();
        let from_json: Vec<CompanyRecord> = read_json(&json_path).unwrap();
        assert_eq!(from_csv, records());
        assert_eq!(from_json, records());
    }

    #[test]
    fn csv_header_uses_provider_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.csv");
        write_csv(&path, &records(), &CompanyRecord::COLUMNS).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, CompanyRecord::COLUMNS.join(","));
    }

    #[test]
    fn empty_rows_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("empty.csv");
        let json_path = dir.path().join("empty.json");

        write_csv::<CompanyRecord>(&csv_path, &[], &CompanyRecord::COLUMNS).unwrap();
        write_json::<CompanyRecord>(&json_path, &[]).unwrap();

        let content = fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.trim_end(), CompanyRecord::COLUMNS.join(","));
        assert!(read_csv::<CompanyRecord>(&csv_path).unwrap().is_empty());
        assert!(read_json::<CompanyRecord>(&json_path).unwrap().is_empty());
    }

    #[test]
    fn symbol_entries_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.csv");
        let mut entry = SymbolEntry::new("AAPL");
        entry.security_type = Some("Common Stock".into());

        write_csv(&path, &[entry.clone()], &SymbolEntry::COLUMNS).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&SymbolEntry::COLUMNS.join(",")));
        assert_eq!(read_csv::<SymbolEntry>(&path).unwrap(), vec![entry]);
    }

    #[test]
    fn no_tmp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        write_json(&path, &records()).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("r.json.tmp").exists());
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let err = write_json(&blocker.join("r.json"), &records()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
