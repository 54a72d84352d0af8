//! Error types shared by the scrapers, the data model and configuration.
//!
//! Source-level failures are values, not aborts: the aggregator turns a
//! [`ScrapeError`] into a recorded failure on the source's report and moves on
//! to the next source.

use thiserror::Error;

/// Failure while fetching or parsing a single top-level source.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, connect, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body could not be read as an RSS or Atom document.
    #[error("could not parse feed {url}: {reason}")]
    Feed { url: String, reason: String },

    /// A configured CSS selector did not parse.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// A configured site origin is not an absolute URL.
    #[error("invalid origin `{origin}`: {source}")]
    Origin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
}

/// Rejected [`crate::models::Article`] construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleError {
    #[error("article link `{0}` is not an absolute http(s) URL")]
    RelativeLink(String),
}

/// Problems loading or validating a [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("source `{name}`: {reason}")]
    InvalidSource { name: String, reason: String },

    #[error("date_concurrency must be at least 1")]
    ZeroConcurrency,
}
