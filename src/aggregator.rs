//! Runs every configured source and gathers the results into a [`Digest`].
//!
//! Sources run one after another in a fixed order: feeds, then site
//! searches, then homepage/blog listings, each group in configuration order.
//! Results are concatenated as they arrive, with no sorting or
//! deduplication. A failing source contributes nothing and leaves its error
//! on the digest; the remaining sources still run.

use crate::config::Config;
use crate::dates::DateOptions;
use crate::error::ScrapeError;
use crate::filter::KeywordFilter;
use crate::models::{Article, Digest, SourceKind};
use crate::scrapers::{rss, sites};
use crate::utils::truncate_for_log;
use reqwest::Client;
use tracing::{error, info, instrument, warn};

/// Fetch, filter and date every configured source.
#[instrument(level = "info", skip_all)]
pub async fn collect(client: &Client, config: &Config) -> Digest {
    let start = std::time::Instant::now();
    let filter = KeywordFilter::new(&config.keywords);
    if filter.is_empty() {
        warn!("No keywords configured; every source will come back empty");
    }
    let dates = DateOptions::from(config);
    let mut digest = Digest::default();

    for feed in &config.feeds {
        let outcome = rss::fetch_feed(client, feed, &filter).await;
        record(&mut digest, &feed.name, SourceKind::Feed, &feed.url, outcome);
    }
    for site in &config.search_sites {
        let outcome = sites::scrape_site(client, site, &filter, &dates).await;
        record(&mut digest, &site.name, SourceKind::Search, &site.url, outcome);
    }
    for site in &config.listing_sites {
        let outcome = sites::scrape_site(client, site, &filter, &dates).await;
        record(&mut digest, &site.name, SourceKind::Listing, &site.url, outcome);
    }

    let elapsed = start.elapsed();
    info!(
        total = digest.articles.len(),
        feeds = digest.count_for(SourceKind::Feed),
        search = digest.count_for(SourceKind::Search),
        listing = digest.count_for(SourceKind::Listing),
        failed_sources = digest.failures().count(),
        millis = elapsed.as_millis() as u64,
        "Aggregation complete"
    );
    digest
}

fn record(
    digest: &mut Digest,
    name: &str,
    kind: SourceKind,
    url: &str,
    outcome: Result<Vec<Article>, ScrapeError>,
) {
    let outcome = outcome.map_err(|e| {
        let reason = e.to_string();
        error!(source = name, ?kind, error = %truncate_for_log(&reason, 300), "Source failed; continuing without it");
        reason
    });
    digest.record(name, kind, url, outcome);
}
