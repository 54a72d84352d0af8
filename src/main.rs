//! # tanker_watch
//!
//! Collects news about chemical tanker newbuilds from RSS feeds and a few
//! shipping-news websites, keeps the items whose text matches a keyword list,
//! and shows them on a single web page or as a terminal report.
//!
//! ## Usage
//!
//! ```sh
//! tanker_watch                    # serve the dashboard on 127.0.0.1:5000
//! tanker_watch report             # print a one-off report
//! tanker_watch -c sources.yaml    # override sources and keywords
//! ```
//!
//! ## Architecture
//!
//! Every page load (or report run) recomputes everything:
//! 1. **Feeds**: Fetch each RSS/Atom feed and keep matching entries
//! 2. **Site searches**: Scrape search-result pages for matching links
//! 3. **Listings**: Scrape homepage/blog listings for matching links
//! 4. **Dates**: Look up publish dates for scraped links (bounded parallelism)
//! 5. **Output**: Render the digest as HTML, JSON or a console report
//!
//! A source that fails is reported on the page and skipped; it never takes
//! the other sources down with it.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregator;
mod cli;
mod config;
mod dates;
mod error;
mod filter;
mod models;
mod outputs;
mod scrapers;
mod server;
mod utils;

use cli::{Cli, Command};
use config::Config;
use outputs::console::render_report;
use server::AppState;

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

    info!("tanker_watch starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.command, "Parsed CLI arguments");

    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => {
            info!("No config file given; using built-in sources");
            Config::default()
        }
    };
    let client = scrapers::build_client(&config)?;

    match args.command() {
        Command::Serve { bind } => {
            let state = Arc::new(AppState { client, config });
            server::serve(state, &bind).await?;
        }
        Command::Report => {
            let start_time = std::time::Instant::now();
            println!("🔍 Searching for new chemical tanker builds...\n");
            let digest = aggregator::collect(&client, &config).await;
            print!("{}", render_report(&digest));

            let elapsed = start_time.elapsed();
            info!(
                ?elapsed,
                articles = digest.articles.len(),
                failed_sources = digest.failures().count(),
                "Report complete"
            );
        }
    }

    Ok(())
}
