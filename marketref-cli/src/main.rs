//! marketref CLI: news, industry enrichment and keyword filtering.
//!
//! Commands:
//! - `news`: company news for the given tickers over a lookback window, saved as Parquet
//! - `industry`: full symbol list, profile enrichment with checkpoints, retained set
//! - `health-filter`: re-derive the keyword subset from a saved `symbols_industry.csv`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marketref_core::{ApiCredential, FinnhubClient};
use marketref_runner::{
    filter_persisted, run_industry_pipeline, run_news_etl, DateWindow, LogProgress,
    PipelineConfig,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marketref")]
#[command(about = "Finnhub market-reference ETL: news, symbol lists, industry enrichment")]
#[command(version)]
struct Cli {
    /// TOML config file. Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file).
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch company news for one or more tickers and save it as news.parquet.
    News {
        /// Tickers to fetch news for (e.g. AAPL MSFT).
        #[arg(short, long, num_args = 1..)]
        tickers: Vec<String>,

        /// Lookback window in days, ending today (UTC).
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Fetch the exchange symbol list, enrich every symbol and save the retained set.
    Industry {
        /// Exchange code (overrides the config file).
        #[arg(long)]
        exchange: Option<String>,

        /// Continue from the newest checkpoint in the output directory.
        #[arg(long, default_value_t = false)]
        resume: bool,
    },
    /// Re-derive the keyword subset from a saved symbols_industry.csv.
    HealthFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = &cli.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("marketref={level},marketref_core={level},marketref_runner={level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::News { tickers, days } => run_news(&config, tickers, days),
        Commands::Industry { exchange, resume } => {
            if let Some(exchange) = exchange {
                config.exchange = exchange;
            }
            config.validate()?;
            run_industry(&config, resume)
        }
        Commands::HealthFilter => run_health_filter(&config),
    }
}

/// Build the Finnhub client. Fails before any network call if the key is missing.
fn connect(config: &PipelineConfig) -> Result<FinnhubClient> {
    let credential = ApiCredential::from_env()?;
    let client = FinnhubClient::new(credential)?;
    Ok(match &config.base_url {
        Some(url) => client.with_base_url(url.as_str()),
        None => client,
    })
}

fn run_news(config: &PipelineConfig, tickers: Vec<String>, days: Option<u32>) -> Result<()> {
    if tickers.is_empty() {
        println!("No tickers specified; nothing to do.");
        return Ok(());
    }
    let client = connect(config)?;
    let limiter = config.rate_limit.limiter()?;
    let window = DateWindow::ending_today(days.unwrap_or(config.news_lookback_days))?;

    match run_news_etl(&client, &tickers, window, &config.layout(), &limiter)
        .context("news ETL failed")?
    {
        Some(summary) => println!(
            "Fetched {} news items → {}",
            summary.items,
            summary.path.display()
        ),
        None => println!("No tickers specified; nothing to do."),
    }
    Ok(())
}

fn run_industry(config: &PipelineConfig, resume: bool) -> Result<()> {
    let client = connect(config)?;
    let summary = run_industry_pipeline(&client, config, &LogProgress, resume)
        .context("industry pipeline failed")?;

    println!(
        "Retained {} of {} symbols ({} failed) → {}",
        summary.retained,
        summary.symbols,
        summary.failed,
        summary.industry_csv.display()
    );
    println!(
        "Keyword subset: {} symbols → {}",
        summary.healthcare,
        summary.healthcare_csv.display()
    );
    Ok(())
}

fn run_health_filter(config: &PipelineConfig) -> Result<()> {
    let (kept, path) = filter_persisted(&config.layout(), &config.keyword_filter())
        .context("keyword filter failed")?;
    println!("Keyword subset: {kept} symbols → {}", path.display());
    Ok(())
}
