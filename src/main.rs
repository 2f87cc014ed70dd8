//! # UWB Digest
//!
//! Collects news about ultra-wideband (UWB) and adjacent IoT topics from
//! RSS/Atom feeds and Google News search feeds, keeps the recent and relevant
//! items, and renders them as a categorized static HTML page.
//!
//! ## Usage
//!
//! ```sh
//! uwb_digest -o ./public/index.html
//! ```
//!
//! ## Architecture
//!
//! The application follows a single-pass pipeline:
//! 1. **Fetching**: Download each configured feed in order (one attempt, 10s timeout)
//! 2. **Filtering**: Drop items older than the lookback window or matching no keyword
//! 3. **Cleaning**: Strip markup, boilerplate and publisher names from summaries
//! 4. **Dedupe & classify**: Keep the first item per link, assign one category each
//! 5. **Output**: Sort newest first and write the grouped digest as HTML (and optionally JSON)

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod config;
mod error;
mod filters;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod text;
mod utils;

use cli::Cli;
use config::Config;
use outputs::{html, json};
use pipeline::Pipeline;
use scrapers::feed::FeedFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("uwb_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = Config::load(args.config.as_deref()).inspect_err(|e| {
        error!(error = %e, "Configuration rejected");
    })?;
    if let Some(days) = args.lookback_days {
        config.lookback_days = days;
        config.validate()?;
    }
    let sources = config.resolve_sources()?;
    info!(
        sources = sources.len(),
        keywords = config.keywords.len(),
        lookback_days = config.lookback_days,
        "Configuration ready"
    );

    // ---- Pipeline ----
    let fetcher = FeedFetcher::new(&config.fetch)?;
    let pipeline = Pipeline::new(&config, sources, fetcher);
    let (digest, stats) = pipeline.run(Utc::now()).await;

    if digest.is_empty() {
        info!("No relevant feed items this run; rendering empty state");
    }

    // ---- Output ----
    if let Err(e) = html::write(&digest, &config.page, &args.output).await {
        error!(path = %args.output.display(), error = %e, "Failed writing HTML digest");
        return Err(e);
    }

    if let Some(ref json_path) = args.json_output {
        if let Err(e) = json::write_digest(&digest, json_path).await {
            warn!(path = %json_path.display(), error = %e, "Failed writing JSON digest; continuing");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = digest.article_count(),
        with_summary = digest.articles().filter(|a| a.has_summary()).count(),
        feed_articles = digest.feed_article_count,
        categories = digest.groups.len(),
        sources_skipped = stats.sources_skipped,
        path = %args.output.display(),
        "Execution complete"
    );

    Ok(())
}
