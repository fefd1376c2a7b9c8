//! Columnar news snapshot.
//!
//! All fetched news rows are flattened into one Polars `DataFrame` with a
//! trailing `symbol` column and written as a single Parquet file. Writes are
//! atomic (write to `.tmp`, rename into place).

use super::provider::DataError;
use crate::domain::{NewsItem, NewsRow};
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Column order of the news table.
pub const NEWS_COLUMNS: [&str; 10] = [
    "category", "datetime", "headline", "id", "image", "related", "source", "summary", "url",
    "symbol",
];

/// Convert news rows to a Polars DataFrame.
pub fn news_to_dataframe(rows: &[NewsRow]) -> Result<DataFrame, DataError> {
    let categories = text_column(rows, |i| i.category.as_ref());
    let datetimes: Vec<Option<i64>> = rows.iter().map(|r| r.item.datetime).collect();
    let headlines = text_column(rows, |i| i.headline.as_ref());
    let ids: Vec<Option<i64>> = rows.iter().map(|r| r.item.id).collect();
    let images = text_column(rows, |i| i.image.as_ref());
    let related = text_column(rows, |i| i.related.as_ref());
    let sources = text_column(rows, |i| i.source.as_ref());
    let summaries = text_column(rows, |i| i.summary.as_ref());
    let urls = text_column(rows, |i| i.url.as_ref());
    let symbols: Vec<String> = rows.iter().map(|r| r.symbol.clone()).collect();

    DataFrame::new(vec![
        Column::new("category".into(), categories),
        Column::new("datetime".into(), datetimes),
        Column::new("headline".into(), headlines),
        Column::new("id".into(), ids),
        Column::new("image".into(), images),
        Column::new("related".into(), related),
        Column::new("source".into(), sources),
        Column::new("summary".into(), summaries),
        Column::new("url".into(), urls),
        Column::new("symbol".into(), symbols),
    ])
    .map_err(|e| DataError::ParquetError(format!("dataframe creation: {e}")))
}

fn text_column(rows: &[NewsRow], field: impl Fn(&NewsItem) -> Option<&String>) -> Vec<Option<String>> {
    rows.iter().map(|r| field(&r.item).cloned()).collect()
}

/// Write news rows to `path` as Parquet. Returns the number of rows written.
pub fn write_news_parquet(path: &Path, rows: &[NewsRow]) -> Result<usize, DataError> {
    let mut df = news_to_dataframe(rows)?;
    let tmp_path = path.with_extension("parquet.tmp");

    let file = fs::File::create(&tmp_path)
        .map_err(|e| DataError::ParquetError(format!("create file: {e}")))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(|e| DataError::ParquetError(format!("write parquet: {e}")))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::ParquetError(format!("atomic rename failed: {e}"))
    })?;

    Ok(df.height())
}
