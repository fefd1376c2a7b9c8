//! Output directory layout.
//!
//! Layout under the output root (default `data/`):
//! - `all_{exchange}_symbols.{csv,json}`: full symbol list
//! - `symbols_industry_partial_{N}.{csv,json}`: checkpoint after N symbols
//! - `symbols_industry.{csv,json}`: final retained set
//! - `healthcare_symbols.csv`: keyword subset of the retained set
//! - `symbols_industry_fallback.csv`: written only when a batch aborts
//! - `news.parquet`: news snapshot

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CHECKPOINT_PREFIX: &str = "symbols_industry_partial_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output root if it does not exist.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn symbols_csv(&self, exchange: &str) -> PathBuf {
        self.root.join(format!("all_{}_symbols.csv", exchange.to_lowercase()))
    }

    pub fn symbols_json(&self, exchange: &str) -> PathBuf {
        self.root.join(format!("all_{}_symbols.json", exchange.to_lowercase()))
    }

    pub fn checkpoint_csv(&self, position: usize) -> PathBuf {
        self.root.join(format!("{CHECKPOINT_PREFIX}{position}.csv"))
    }

    pub fn checkpoint_json(&self, position: usize) -> PathBuf {
        self.root.join(format!("{CHECKPOINT_PREFIX}{position}.json"))
    }

    pub fn industry_csv(&self) -> PathBuf {
        self.root.join("symbols_industry.csv")
    }

    pub fn industry_json(&self) -> PathBuf {
        self.root.join("symbols_industry.json")
    }

    pub fn healthcare_csv(&self) -> PathBuf {
        self.root.join("healthcare_symbols.csv")
    }

    pub fn fallback_csv(&self) -> PathBuf {
        self.root.join("symbols_industry_fallback.csv")
    }

    pub fn news_parquet(&self) -> PathBuf {
        self.root.join("news.parquet")
    }

    /// Cursor position embedded in a checkpoint CSV file name, if it is one.
    pub fn checkpoint_position(file_name: &str) -> Option<usize> {
        file_name
            .strip_prefix(CHECKPOINT_PREFIX)?
            .strip_suffix(".csv")?
            .parse()
            .ok()
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_deterministic() {
        let layout = OutputLayout::new("out");
        assert_eq!(layout.symbols_csv("US"), Path::new("out/all_us_symbols.csv"));
        assert_eq!(layout.symbols_json("US"), Path::new("out/all_us_symbols.json"));
        assert_eq!(
            layout.checkpoint_csv(500),
            Path::new("out/symbols_industry_partial_500.csv")
        );
        assert_eq!(
            layout.checkpoint_json(1000),
            Path::new("out/symbols_industry_partial_1000.json")
        );
        assert_eq!(layout.fallback_csv(), Path::new("out/symbols_industry_fallback.csv"));
        assert_eq!(layout.news_parquet(), Path::new("out/news.parquet"));
    }

    #[test]
    fn parses_checkpoint_positions() {
        assert_eq!(
            OutputLayout::checkpoint_position("symbols_industry_partial_1500.csv"),
            Some(1500)
        );
        assert_eq!(
            OutputLayout::checkpoint_position("symbols_industry_partial_1500.json"),
            None
        );
        assert_eq!(
            OutputLayout::checkpoint_position("symbols_industry_partial_x.csv"),
            None
        );
        assert_eq!(OutputLayout::checkpoint_position("symbols_industry.csv"), None);
    }

    #[test]
    fn default_root_is_data() {
        assert_eq!(OutputLayout::default().root(), Path::new("data"));
    }
}
