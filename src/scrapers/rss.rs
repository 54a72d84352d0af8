//! RSS and Atom feed reader.
//!
//! Feeds carry their own dates, so unlike the scraped sites no per-article
//! date lookup is needed. An entry is kept when its title or its summary
//! matches the keyword filter.
//!
//! Parsing is delegated to `feed-rs`, which accepts RSS 0.9/1.0/2.0, Atom
//! and JSON Feed, including namespaced extensions such as `media:` and
//! `itunes:`. For each entry:
//!
//! - the link is the first `alternate` (or rel-less) link, else the first link
//! - the summary falls back to the full content when absent or blank
//! - the date is `published`, falling back to `updated`, in RFC 2822 form

use super::{fetch_text, resolve_link};
use crate::config::FeedSource;
use crate::error::ScrapeError;
use crate::filter::KeywordFilter;
use crate::models::Article;
use crate::utils::{html_to_text, normalize_whitespace};
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// One feed entry before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Plain text of the summary; empty when the entry has none.
    pub summary: String,
    pub published: Option<String>,
}

impl From<Entry> for FeedEntry {
    fn from(entry: Entry) -> Self {
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
            .or_else(|| entry.links.first())
            .map(|l| l.href.trim().to_string());
        let summary = entry
            .summary
            .map(|s| s.content)
            .filter(|s| !s.trim().is_empty())
            .or_else(|| entry.content.and_then(|c| c.body))
            .map(|s| html_to_text(&s))
            .unwrap_or_default();
        FeedEntry {
            title: entry.title.map(|t| normalize_whitespace(&t.content)),
            link,
            summary,
            published: entry.published.or(entry.updated).map(|d| d.to_rfc2822()),
        }
    }
}

/// Parse a feed document into entries.
///
/// # Errors
///
/// Returns the parser's message when the document is not a recognizable feed.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, String> {
    let feed = parser::parse(xml.as_bytes()).map_err(|e| e.to_string())?;
    Ok(feed.entries.into_iter().map(FeedEntry::from).collect())
}

/// Keep matching entries and turn them into articles.
///
/// Entries without a title or without a usable link are skipped. Relative
/// links are resolved against the feed URL.
pub fn select_entries(entries: Vec<FeedEntry>, base: &Url, filter: &KeywordFilter) -> Vec<Article> {
    let mut articles = Vec::new();
    for entry in entries {
        let Some(title) = entry.title else {
            warn!(link = ?entry.link, "Feed entry has no title; skipping");
            continue;
        };
        if !filter.matches_any([title.as_str(), entry.summary.as_str()]) {
            continue;
        }
        let Some(link) = entry.link.as_deref().and_then(|l| resolve_link(base, l)) else {
            warn!(%title, link = ?entry.link, "Feed entry has no usable link; skipping");
            continue;
        };
        match Article::new(title, link, entry.published) {
            Ok(article) => {
                debug!(title = %article.title, "Feed entry matched");
                articles.push(article);
            }
            Err(e) => warn!(error = %e, "Dropping feed entry"),
        }
    }
    articles
}

/// Fetch a feed and return its keyword-matching entries.
///
/// # Errors
///
/// Fails when the feed cannot be fetched or is not a recognizable feed.
#[instrument(level = "info", skip_all, fields(source = %feed.name, url = %feed.url))]
pub async fn fetch_feed(
    client: &Client,
    feed: &FeedSource,
    filter: &KeywordFilter,
) -> Result<Vec<Article>, ScrapeError> {
    let base = Url::parse(&feed.url).map_err(|source| ScrapeError::Origin {
        origin: feed.url.clone(),
        source,
    })?;
    let xml = fetch_text(client, &feed.url).await?;
    let entries = parse_feed(&xml).map_err(|reason| ScrapeError::Feed {
        url: feed.url.clone(),
        reason,
    })?;

    let total = entries.len();
    let articles = select_entries(entries, &base, filter);
    info!(total, matched = articles.len(), "Filtered feed entries");
    Ok(articles)
}
