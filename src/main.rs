//! # News Pulse
//!
//! An incremental news archiver that fetches headlines about a fixed set of
//! tracked companies from the Google News RSS search feed, filters them to a
//! curated allow-list of publishers, normalizes titles and dates, and merges
//! them into a durable, deduplicated JSON archive keyed by article link.
//!
//! ## Usage
//!
//! ```sh
//! news_pulse -d ./news-data.json
//! ```
//!
//! Designed to run locally or from a CI scheduler; each invocation performs
//! one full update pass and exits.
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture, strictly sequential per
//! company:
//! 1. **Fetch**: Download the search feed for each company's query
//! 2. **Filter**: Keep items from allow-listed publishers only
//! 3. **Normalize**: Strip publisher suffixes from titles, canonicalize dates
//! 4. **Merge**: Deduplicate by link into the per-company archive list
//! 5. **Persist**: Write the whole archive back in one pretty-printed JSON file

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod merge;
mod models;
mod normalize;
mod scrapers;
mod store;
mod updater;

use cli::Cli;
use config::AppConfig;
use scrapers::google_news::GoogleNews;
use updater::{CompanyOutcome, Updater};

#[tokio::main]
#[instrument]
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
    info!("news_pulse starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.data_file, ?args.config, args.max_items, args.fetch_delay, "Parsed CLI arguments");

    // Unreadable configuration is fatal before any processing.
    let config = AppConfig::load(args.config.as_deref())?;

    // A present-but-corrupt archive is fatal too; only a missing file starts empty.
    let mut archive = store::load_archive(&args.data_file).await?;

    let updater = Updater::new(
        config,
        args.max_items,
        Duration::from_secs(args.fetch_delay),
    );
    let reports = updater.run(&GoogleNews, &mut archive).await;

    let total_added: usize = reports.iter().map(|r| r.added()).sum();
    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| matches!(r.outcome, CompanyOutcome::Failed { .. }))
        .map(|r| r.name.as_str())
        .collect();
    info!(
        companies = reports.len(),
        total_added,
        failed = failed.len(),
        failed_companies = ?failed,
        "Update pass finished"
    );

    // Per-company failures are tolerated; a failed final write is not.
    store::save_archive(&mut archive, &args.data_file).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
