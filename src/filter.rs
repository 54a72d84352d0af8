//! Keyword matching shared by every source.
//!
//! Matching is plain case-insensitive substring containment: no stemming,
//! tokenization or word boundaries. With the default keyword list (which
//! includes generic words such as "order" and "contract") the filter is
//! deliberately noisy, trading precision for recall.

/// True iff any keyword occurs in `text`, ignoring case.
///
/// Keywords are used verbatim, surrounding spaces included. Empty keywords
/// are ignored rather than matching everything.
pub fn matches<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let haystack = text.to_lowercase();
    keywords.iter().any(|k| {
        let needle = k.as_ref().to_lowercase();
        !needle.is_empty() && haystack.contains(&needle)
    })
}

/// A keyword list lowercased once and reused across a whole aggregation.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }

    /// True if any of `texts` matches (used for feed title OR summary).
    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> bool {
        texts.into_iter().any(|t| self.matches(t))
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive() {
        assert!(matches("NEW BUILD ORDER", &["order"]));
        assert!(matches("new build order", &["ORDER"]));
    }

    #[test]
    fn test_matches_is_plain_substring() {
        // "order" inside "border" still counts
        assert!(matches("Border dispute", &["order"]));
        assert!(!matches("Bulk carrier sold", &["chemical tanker", "newbuild"]));
    }

    #[test]
    fn test_matches_ignores_empty_keywords() {
        assert!(!matches("anything", &[""]));
        assert!(!matches("anything", &[] as &[&str]));
    }

    #[test]
    fn test_matches_keeps_keyword_spaces() {
        let keywords = [" order "];
        assert!(!matches("Reorder of vessels", &keywords));
        assert!(matches("Owners place an order now", &keywords));

        let filter = KeywordFilter::new(&keywords);
        assert!(!filter.matches("Reorder of vessels"));
        assert!(filter.matches("Owners place an order now"));
    }

    #[test]
    fn test_filter_agrees_with_free_function() {
        let keywords = ["Chemical Tanker", "newbuild"];
        let filter = KeywordFilter::new(&keywords);
        for text in [
            "Owner orders new CHEMICAL TANKER",
            "Newbuilds galore",
            "Container line results",
            "",
        ] {
            assert_eq!(filter.matches(text), matches(text, &keywords), "{text}");
        }
    }

    #[test]
    fn test_filter_matches_any() {
        let filter = KeywordFilter::new(&["newbuild"]);
        assert!(filter.matches_any(["Fleet update", "Two newbuilds delivered"]));
        assert!(!filter.matches_any(["Fleet update", "details..."]));
    }

    #[test]
    fn test_filter_drops_empty_keywords() {
        let filter = KeywordFilter::new(&["", ""]);
        assert!(filter.is_empty());
        assert!(!filter.matches("chemical tanker"));
    }
}
