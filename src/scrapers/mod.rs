//! Source fetchers for feeds and scraped shipping-news pages.
//!
//! # Supported Sources
//!
//! | Kind | Module | Method | Notes |
//! |------|--------|--------|-------|
//! | RSS / Atom feed | [`rss`] | XML parse | Filters on title or summary |
//! | Site search page | [`sites`] | HTML scraping | Usually every anchor on the page |
//! | Homepage / blog | [`sites`] | HTML scraping | All anchors or a scoped CSS selector |
//!
//! Scraped sources have no dates in their listings, so each matched link is
//! looked up through [`crate::dates`].
//!
//! Every fetch goes through [`fetch_text`], which turns transport failures and
//! non-success statuses into a [`ScrapeError`] for the aggregator to record.

pub mod rss;
pub mod sites;

use crate::config::Config;
use crate::error::ScrapeError;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Build the shared HTTP client.
///
/// The User-Agent applies to every request (feeds, pages and date lookups);
/// the fetch timeout is the default that date lookups override per request.
pub fn build_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.fetch_timeout())
        .build()
}

/// GET a URL and return its body as text.
///
/// # Errors
///
/// [`ScrapeError::Http`] on transport failure or timeout, and
/// [`ScrapeError::Status`] when the response is not a success.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let http = |source: reqwest::Error| ScrapeError::Http {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().await.map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.text().await.map_err(http)?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}

/// Make an href absolute against a site origin.
///
/// An href that already parses as an absolute URL is returned unchanged.
/// Anything else is joined onto `origin`, so `/news/123` on
/// `https://example.com` becomes `https://example.com/news/123`. Links that
/// end up with a non-web scheme (`mailto:`, `javascript:`) yield `None`.
pub fn resolve_link(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if let Ok(absolute) = Url::parse(href) {
        return is_web(&absolute).then(|| href.to_string());
    }
    let joined = origin.join(href).ok()?;
    is_web(&joined).then(|| joined.to_string())
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
