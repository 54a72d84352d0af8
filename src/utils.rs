//! Text helpers shared by the scrapers and the renderers.
//!
//! - Whitespace normalization for scraped anchor text and feed titles
//! - Markup stripping for feed summaries
//! - String truncation for log fields

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_whitespace("  Chemical\n\t tanker  "), "Chemical tanker");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Visible text of an element, with whitespace normalized.
///
/// Text nodes are concatenated as-is before normalizing, so inline markup
/// inside a word (`new<b>build</b>`) does not split it.
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Plain text of an HTML fragment, such as a feed item description.
pub fn html_to_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    element_text(&parsed.root_element())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters and get a `"…(+N chars)"`
/// suffix. Cuts on character boundaries, so multi-byte text is safe.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}…(+{} chars)", total - max)
    }
}
