//! Source and keyword configuration.
//!
//! The built-in defaults cover one Splash247 tanker feed, two site searches
//! (TradeWinds, AXSMarine) and two listing pages (Splash247 tankers category,
//! AXSMarine blog). A YAML file can replace any part of it:
//!
//! ```yaml
//! keywords: ["chemical tanker", "newbuild"]
//! feeds:
//!   - name: Splash247 tankers
//!     url: https://splash247.com/category/sector/tankers/feed/
//! listing_sites:
//!   - name: Splash247 tankers
//!     url: https://splash247.com/category/sector/tankers/
//!     origin: https://splash247.com
//!     extraction:
//!       selector: h2.entry-title a
//! date_timeout_ms: 5000
//! ```
//!
//! Fields left out of the file keep their defaults.

use crate::error::ConfigError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Default keyword list.
///
/// Mixes specific phrases with generic words ("order", "contract",
/// "delivery", "construction", "built"). The generic words make the filter
/// noisy on purpose; narrow the list in a config file for precision.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "newbuild",
    "chemical tanker order",
    "new chemical tankers",
    "chemical tanker contract",
    "chemical carrier order",
    "chemical tanker delivery",
    "chemical tanker",
    "order",
    "contract",
    "delivery",
    "construction",
    "built",
    "newbuilds",
    "chemical tankers",
];

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// How a site page is turned into candidate links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extraction {
    /// Every `a[href]` on the page.
    AllAnchors,
    /// Only anchors matched by this CSS selector.
    Selector(String),
}

impl Extraction {
    pub fn css(&self) -> &str {
        match self {
            Extraction::AllAnchors => "a[href]",
            Extraction::Selector(css) => css,
        }
    }
}

/// An RSS or Atom feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// A scraped HTML page, either a search-results page or a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSource {
    pub name: String,
    /// Page to fetch.
    pub url: String,
    /// Base used to absolutize relative hrefs.
    pub origin: String,
    #[serde(default = "default_extraction")]
    pub extraction: Extraction,
}

fn default_extraction() -> Extraction {
    Extraction::AllAnchors
}

/// Everything the aggregator needs, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered keyword list for the filter.
    pub keywords: Vec<String>,
    /// Feeds, fetched first.
    pub feeds: Vec<FeedSource>,
    /// Search-results pages, fetched after the feeds.
    pub search_sites: Vec<SiteSource>,
    /// Homepage/blog listings, fetched last.
    pub listing_sites: Vec<SiteSource>,
    /// Sent on every outbound request.
    pub user_agent: String,
    /// Timeout for feed, search and listing fetches.
    pub fetch_timeout_ms: u64,
    /// Timeout for each per-article date lookup.
    pub date_timeout_ms: u64,
    /// Maximum date lookups in flight for one source.
    pub date_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            feeds: vec![FeedSource {
                name: "Splash247 tankers".into(),
                url: "https://splash247.com/category/sector/tankers/feed/".into(),
            }],
            search_sites: vec![
                SiteSource {
                    name: "TradeWinds".into(),
                    url: "https://www.tradewindsnews.com/archive/?q=chemical%20tankers&othersections=Tankers&tema_path_facet=Chemical%5C%20tankers".into(),
                    origin: "https://www.tradewindsnews.com".into(),
                    extraction: Extraction::AllAnchors,
                },
                SiteSource {
                    name: "AXSMarine search".into(),
                    url: "https://public.axsmarine.com/?s=chemical+tankers".into(),
                    origin: "https://public.axsmarine.com".into(),
                    extraction: Extraction::AllAnchors,
                },
            ],
            listing_sites: vec![
                SiteSource {
                    name: "Splash247 tankers".into(),
                    url: "https://splash247.com/category/sector/tankers/".into(),
                    origin: "https://splash247.com".into(),
                    extraction: Extraction::Selector("h2.entry-title a".into()),
                },
                SiteSource {
                    name: "AXSMarine blog".into(),
                    url: "https://public.axsmarine.com/blog".into(),
                    origin: "https://public.axsmarine.com".into(),
                    extraction: Extraction::AllAnchors,
                },
            ],
            user_agent: DEFAULT_USER_AGENT.into(),
            fetch_timeout_ms: 30_000,
            date_timeout_ms: 10_000,
            date_concurrency: 4,
        }
    }
}

impl Config {
    /// Load a YAML config file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or fails
    /// [`Config::validate`].
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        info!(
            feeds = config.feeds.len(),
            search_sites = config.search_sites.len(),
            listing_sites = config.listing_sites.len(),
            keywords = config.keywords.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Check origins and selectors up front so a typo shows at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        for site in self.search_sites.iter().chain(&self.listing_sites) {
            let invalid = |reason: String| ConfigError::InvalidSource {
                name: site.name.clone(),
                reason,
            };
            Url::parse(&site.origin).map_err(|e| invalid(format!("origin: {e}")))?;
            Selector::parse(site.extraction.css())
                .map_err(|e| invalid(format!("selector: {e}")))?;
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn date_timeout(&self) -> Duration {
        Duration::from_millis(self.date_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.search_sites.len(), 2);
        assert_eq!(config.listing_sites.len(), 2);
        assert_eq!(config.date_timeout(), Duration::from_secs(10));
        assert_eq!(config.keywords.len(), DEFAULT_KEYWORDS.len());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("keywords: [\"newbuild\"]\ndate_timeout_ms: 500\n").unwrap();
        assert_eq!(config.keywords, vec!["newbuild".to_string()]);
        assert_eq!(config.date_timeout_ms, 500);
        assert_eq!(config.feeds, Config::default().feeds);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_yaml_extraction_variants() {
        let raw = r#"
search_sites:
  - name: Plain
    url: https://a.example/search
    origin: https://a.example
  - name: Scoped
    url: https://b.example/
    origin: https://b.example
    extraction:
      selector: h2.entry-title a
  - name: Explicit
    url: https://c.example/
    origin: https://c.example
    extraction: all_anchors
"#;
        let config = Config::from_yaml(raw).unwrap();
        let kinds: Vec<_> = config.search_sites.iter().map(|s| s.extraction.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                Extraction::AllAnchors,
                Extraction::Selector("h2.entry-title a".into()),
                Extraction::AllAnchors,
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_origin() {
        let mut config = Config::default();
        config.search_sites[0].origin = "/not-absolute".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSource { name, .. }) if name == "TradeWinds"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.listing_sites[0].extraction = Extraction::Selector("h2[[".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            date_concurrency: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));
    }

    #[test]
    fn test_example_file_parses_and_validates() {
        let config = Config::from_yaml(include_str!("../sources.example.yaml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.keywords.len(), 3);
        assert_eq!(config.search_sites.len(), 1);
        assert_eq!(
            config.listing_sites[0].extraction,
            Extraction::Selector("h2.entry-title a".into())
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
