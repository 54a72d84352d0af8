//! Data models for matched articles and the per-request digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A keyword-matched item from one of the configured sources
//! - [`Candidate`]: A matched scraped link still waiting for its date
//! - [`SourceReport`]: What a single source contributed (or why it failed)
//! - [`Digest`]: Everything one aggregation run produced, in output order
//!
//! Nothing here is persisted. A digest is built fresh for every page load or
//! console run and dropped after rendering.

use crate::error::ArticleError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder for a publish date that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// A news item that matched the keyword filter.
///
/// # Fields
///
/// * `title` - Headline text as the source presented it
/// * `link` - Absolute URL of the article
/// * `published` - Source-supplied or scraped date string, or [`NOT_AVAILABLE`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// The headline. Sources occasionally yield empty strings; these are kept.
    pub title: String,
    /// The absolute article URL.
    pub link: String,
    /// The publish date string, or `"N/A"` when unknown.
    pub published: String,
}

impl Article {
    /// Build an article, enforcing an absolute link and defaulting the date.
    ///
    /// A `published` value that is `None` or only whitespace becomes
    /// [`NOT_AVAILABLE`].
    ///
    /// # Errors
    ///
    /// Returns [`ArticleError::RelativeLink`] if `link` is not an absolute
    /// `http` or `https` URL.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        published: Option<String>,
    ) -> Result<Self, ArticleError> {
        let link = link.into();
        match Url::parse(&link) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ArticleError::RelativeLink(link)),
        }

        let published = published
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(Self {
            title: title.into(),
            link,
            published,
        })
    }

    /// Whether the publish date is the [`NOT_AVAILABLE`] placeholder.
    pub fn has_date(&self) -> bool {
        self.published != NOT_AVAILABLE
    }
}

/// A scraped link that passed the keyword filter but has no date yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    /// Already absolute.
    pub link: String,
}

/// The aggregation stage a source belongs to.
///
/// Stages run in declaration order: feeds, then site searches, then
/// homepage/blog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// An RSS or Atom feed.
    Feed,
    /// A site's search-results page.
    Search,
    /// A site's homepage, category page or blog listing.
    Listing,
}

impl SourceKind {
    /// Human-readable label used in the console report and the HTML page.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Feed => "RSS feeds",
            SourceKind::Search => "site searches",
            SourceKind::Listing => "homepage/blog listings",
        }
    }
}

/// Outcome of a single source within one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Configured source name.
    pub name: String,
    /// Which stage the source ran in.
    pub kind: SourceKind,
    /// The URL that was fetched.
    pub url: String,
    /// Number of articles the source contributed.
    pub count: usize,
    /// Failure reason when the source could not be read.
    pub error: Option<String>,
}

/// All articles produced by one aggregation run, plus per-source outcomes.
///
/// `articles` is in source registration order and is never sorted or
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Matched articles in output order.
    pub articles: Vec<Article>,
    /// One report per configured source, in the order they ran.
    pub sources: Vec<SourceReport>,
}

impl Digest {
    /// Append a source's outcome. A failed source contributes no articles.
    pub fn record(
        &mut self,
        name: &str,
        kind: SourceKind,
        url: &str,
        outcome: Result<Vec<Article>, String>,
    ) {
        let (count, error) = match outcome {
            Ok(articles) => {
                let count = articles.len();
                self.articles.extend(articles);
                (count, None)
            }
            Err(reason) => (0, Some(reason)),
        };
        self.sources.push(SourceReport {
            name: name.to_string(),
            kind,
            url: url.to_string(),
            count,
            error,
        });
    }

    /// Total articles contributed by sources of one kind.
    pub fn count_for(&self, kind: SourceKind) -> usize {
        self.sources
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.count)
            .sum()
    }

    /// Reports for sources that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| s.error.is_some())
    }

    /// True when at least one source failed and results are incomplete.
    pub fn is_partial(&self) -> bool {
        self.failures().next().is_some()
    }
}
