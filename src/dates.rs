//! Publish-date recovery for scraped links.
//!
//! Search and listing pages do not show dates, so every matched link is
//! fetched and its `<meta>` tags inspected. Lookups never fail: any fetch,
//! timeout or parse problem turns into [`NOT_AVAILABLE`] so that one dead link
//! cannot sink a whole source.
//!
//! Lookups for one source run with a bounded number in flight, each under its
//! own timeout, and results keep the order of the candidates.

use crate::config::Config;
use crate::models::{Article, Candidate, NOT_AVAILABLE};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Metadata tags that may carry a publish date, highest priority first.
pub const DATE_META_TAGS: [&str; 4] = [
    r#"meta[name="pubdate"]"#,
    r#"meta[name="date"]"#,
    r#"meta[property="article:published_time"]"#,
    r#"meta[itemprop="datePublished"]"#,
];

static DATE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    DATE_META_TAGS
        .iter()
        .map(|css| Selector::parse(css).expect("valid date meta selector"))
        .collect()
});

/// Limits for a batch of date lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOptions {
    /// Per-lookup timeout.
    pub timeout: Duration,
    /// Maximum lookups in flight.
    pub concurrency: usize,
}

impl From<&Config> for DateOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.date_timeout(),
            concurrency: config.date_concurrency,
        }
    }
}

/// First non-empty `content` of the known date tags, in priority order.
pub fn extract_published(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    DATE_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    })
}

/// Fetch `url` and return its publish date, or `"N/A"`.
#[instrument(level = "debug", skip(client, timeout))]
pub async fn resolve_date(client: &Client, url: &str, timeout: Duration) -> String {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, %url, "Date lookup request failed");
            return NOT_AVAILABLE.to_string();
        }
    };
    if !response.status().is_success() {
        warn!(status = %response.status(), %url, "Date lookup got non-success status");
        return NOT_AVAILABLE.to_string();
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, %url, "Date lookup body read failed");
            return NOT_AVAILABLE.to_string();
        }
    };

    match extract_published(&body) {
        Some(date) => {
            debug!(%date, "Found publish date");
            date
        }
        None => {
            debug!("No publish date metadata");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Resolve dates for candidates and build articles, preserving order.
///
/// Candidates whose link is not absolute are dropped with a warning.
#[instrument(level = "info", skip_all, fields(count = candidates.len()))]
pub async fn resolve_dates(
    client: &Client,
    candidates: Vec<Candidate>,
    options: &DateOptions,
) -> Vec<Article> {
    let timeout = options.timeout;
    let articles: Vec<Article> = stream::iter(candidates)
        .map(|candidate| async move {
            let published = resolve_date(client, &candidate.link, timeout).await;
            Article::new(candidate.title, candidate.link, Some(published))
        })
        .buffered(options.concurrency.max(1))
        .filter_map(|built| async move {
            built
                .map_err(|e| warn!(error = %e, "Dropping scraped link"))
                .ok()
        })
        .collect()
        .await;

    let dated = articles.iter().filter(|a| a.has_date()).count();
    info!(total = articles.len(), dated, "Resolved publish dates");
    articles
}
