//! Host page location: site identifier, `q` parameter and results-page detection.

use url::Url;

use crate::error::WidgetError;

/// Path fragment that marks the dedicated search results page.
pub const RESULTS_PAGE_MARKER: &str = "search-app-results";

/// The parts of the host page URL the widget cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Site identifier derived from the hostname.
    pub site_name: String,
    /// Normalised `q` query parameter, if present and non-blank.
    pub query: Option<String>,
    /// Whether this is the results page, which searches on load.
    pub is_results_page: bool,
}

impl PageLocation {
    /// Parse a full page URL.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] if the URL cannot be parsed or has no host.
    pub fn parse(page_url: &str) -> Result<Self, WidgetError> {
        let url = Url::parse(page_url)
            .map_err(|e| WidgetError::Config(format!("invalid page URL: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| WidgetError::Config("page URL has no host".into()))?;

        let query = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .and_then(|(_, value)| normalize_query(&value));

        Ok(Self {
            site_name: site_name_from_host(host),
            query,
            is_results_page: url.path().contains(RESULTS_PAGE_MARKER),
        })
    }
}

/// Derive the site identifier: drop a leading `www.` and keep everything
/// before the first remaining `.`.
///
/// `www.acme.com` → `acme`, `docs.acme.io` → `docs`, `localhost` → `localhost`.
pub fn site_name_from_host(host: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().unwrap_or(host).to_owned()
}

/// Trim and lowercase a query, returning `None` when nothing is left.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Resolve the query to search for: the input field wins, the URL `q`
/// parameter is used only when the field is blank.
pub fn resolve_query(input: Option<&str>, location: Option<&PageLocation>) -> Option<String> {
    input
        .and_then(normalize_query)
        .or_else(|| location.and_then(|loc| loc.query.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_name_strips_www_and_tld() {
        assert_eq!(site_name_from_host("www.acme.com"), "acme");
        assert_eq!(site_name_from_host("acme.webflow.io"), "acme");
        assert_eq!(site_name_from_host("docs.acme.io"), "docs");
        assert_eq!(site_name_from_host("localhost"), "localhost");
    }

    #[test]
    fn only_leading_www_is_stripped() {
        assert_eq!(site_name_from_host("shop.www.acme.com"), "shop");
        assert_eq!(site_name_from_host("wwwacme.com"), "wwwacme");
    }

    #[test]
    fn parse_reads_query_and_results_page() {
        let loc = PageLocation::parse("https://www.acme.com/search-app-results?q=%20Red%20Shoes%20")
            .expect("valid URL");
        assert_eq!(loc.site_name, "acme");
        assert_eq!(loc.query.as_deref(), Some("red shoes"));
        assert!(loc.is_results_page);
    }

    #[test]
    fn parse_without_query() {
        let loc = PageLocation::parse("https://acme.com/about").expect("valid URL");
        assert!(loc.query.is_none());
        assert!(!loc.is_results_page);
    }

    #[test]
    fn blank_q_parameter_is_none() {
        let loc = PageLocation::parse("https://acme.com/?q=+++").expect("valid URL");
        assert!(loc.query.is_none());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(PageLocation::parse("not a url").is_err());
    }

    #[test]
    fn input_takes_precedence_over_url() {
        let loc = PageLocation::parse("https://acme.com/?q=from-url").expect("valid URL");
        assert_eq!(
            resolve_query(Some(" Typed "), Some(&loc)).as_deref(),
            Some("typed")
        );
        assert_eq!(
            resolve_query(Some("   "), Some(&loc)).as_deref(),
            Some("from-url")
        );
        assert_eq!(resolve_query(None, None), None);
    }
}
