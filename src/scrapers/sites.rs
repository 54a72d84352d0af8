//! HTML scraper for search-result pages and homepage/blog listings.
//!
//! Both kinds of page are handled the same way: fetch, pick anchors with the
//! site's [`Extraction`] strategy, keep those whose text matches the keyword
//! filter, absolutize the href against the site origin, then look up each
//! link's publish date.
//!
//! The `AllAnchors` strategy scans the whole page, so navigation and footer
//! links whose text happens to match (an "Order" menu item) come through as
//! well. Sites with a stable markup are better served by a scoped selector
//! such as `h2.entry-title a`.

use super::{fetch_text, resolve_link};
use crate::config::{Extraction, SiteSource};
use crate::dates::{resolve_dates, DateOptions};
use crate::error::ScrapeError;
use crate::filter::KeywordFilter;
use crate::models::{Article, Candidate};
use crate::utils::element_text;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// Pull keyword-matching links out of a page.
///
/// Anchors without an `href`, or whose href cannot be made into an http(s)
/// URL, are ignored. A selector that matches nothing yields an empty list.
///
/// # Errors
///
/// Only when the configured selector is not valid CSS.
pub fn extract_candidates(
    html: &str,
    extraction: &Extraction,
    origin: &Url,
    filter: &KeywordFilter,
) -> Result<Vec<Candidate>, ScrapeError> {
    let selector = Selector::parse(extraction.css()).map_err(|e| ScrapeError::Selector {
        selector: extraction.css().to_string(),
        reason: e.to_string(),
    })?;
    let document = Html::parse_document(html);

    let mut candidates = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let title = element_text(&element);
        if !filter.matches(&title) {
            continue;
        }
        match resolve_link(origin, href) {
            Some(link) => candidates.push(Candidate { title, link }),
            None => debug!(%href, "Skipping non-web link"),
        }
    }
    Ok(candidates)
}

/// Scrape one site and return its matching links with resolved dates.
///
/// # Errors
///
/// Fails when the origin is invalid, the page cannot be fetched, or the
/// selector is invalid.
#[instrument(level = "info", skip_all, fields(source = %site.name, url = %site.url))]
pub async fn scrape_site(
    client: &Client,
    site: &SiteSource,
    filter: &KeywordFilter,
    dates: &DateOptions,
) -> Result<Vec<Article>, ScrapeError> {
    let origin = Url::parse(&site.origin).map_err(|source| ScrapeError::Origin {
        origin: site.origin.clone(),
        source,
    })?;
    let html = fetch_text(client, &site.url).await?;
    let candidates = extract_candidates(&html, &site.extraction, &origin, filter)?;
    info!(count = candidates.len(), "Indexed matching links");
    debug!(links = ?candidates.iter().map(|c| &c.link).collect::<Vec<_>>(), "Candidate links");

    Ok(resolve_dates(client, candidates, dates).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <nav><a href="/shop">Order</a><a href="/about">About us</a></nav>
  <main>
    <a href="/x">Chemical tanker contract signed</a>
    <a href="https://elsewhere.example/y">Yard wins <em>newbuild</em> deal</a>
    <a>Chemical tanker without href</a>
    <a href="mailto:desk@example.com">Contract desk</a>
  </main>
</body></html>"#;

    const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <h2 class="entry-title"><a href="https://splash247.com/one/">Chemical tanker newbuild ordered</a></h2>
  <h2 class="entry-title"><a href="https://splash247.com/two/">Crew change rules</a></h2>
  <div class="sidebar"><a href="/three/">Another chemical tanker story</a></div>
</body></html>"#;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    fn filter() -> KeywordFilter {
        KeywordFilter::new(&["chemical tanker", "order", "contract", "newbuild"])
    }

    #[test]
    fn test_all_anchors_scans_whole_page() {
        let candidates =
            extract_candidates(SEARCH_PAGE, &Extraction::AllAnchors, &origin(), &filter()).unwrap();
        assert_eq!(
            candidates,
            vec![
                // nav item is a false positive by construction
                Candidate {
                    title: "Order".into(),
                    link: "https://example.com/shop".into()
                },
                Candidate {
                    title: "Chemical tanker contract signed".into(),
                    link: "https://example.com/x".into()
                },
                Candidate {
                    title: "Yard wins newbuild deal".into(),
                    link: "https://elsewhere.example/y".into()
                },
            ]
        );
    }

    #[test]
    fn test_selector_scopes_to_entry_titles() {
        let candidates = extract_candidates(
            LISTING_PAGE,
            &Extraction::Selector("h2.entry-title a".into()),
            &Url::parse("https://splash247.com").unwrap(),
            &filter(),
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].link, "https://splash247.com/one/");
    }

    #[test]
    fn test_selector_matching_nothing_is_empty() {
        let candidates = extract_candidates(
            "<html><body><p>maintenance</p></body></html>",
            &Extraction::Selector("h2.entry-title a".into()),
            &origin(),
            &filter(),
        )
        .unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let err = extract_candidates(
            SEARCH_PAGE,
            &Extraction::Selector("a[[".into()),
            &origin(),
            &filter(),
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[tokio::test]
    async fn test_scrape_site_without_date_yields_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><a href="/x">Chemical tanker contract signed</a></body></html>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><head></head></html>"),
            )
            .mount(&server)
            .await;

        let site = SiteSource {
            name: "Test search".into(),
            url: format!("{}/search", server.uri()),
            origin: server.uri(),
            extraction: Extraction::AllAnchors,
        };
        let options = DateOptions {
            timeout: Duration::from_secs(5),
            concurrency: 2,
        };
        let client = Client::new();

        let articles = scrape_site(&client, &site, &filter(), &options).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Chemical tanker contract signed");
        assert_eq!(articles[0].link, format!("{}/x", server.uri()));
        assert_eq!(articles[0].published, NOT_AVAILABLE);
    }
}
