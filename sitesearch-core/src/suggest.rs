//! Autocomplete suggestions for partial queries.
//!
//! Suggestions are fetched fresh for every keystroke (no caching), stripped
//! of embedded markup and title-cased for display. Every failure degrades
//! to an empty batch, which tells the host to hide the suggestion surface.

use scraper::Html;
use serde::Deserialize;

use crate::config::{encode_list, WidgetConfig};
use crate::error::WidgetError;
use crate::http;

/// Path of the suggestion endpoint.
pub const SUGGESTIONS_PATH: &str = "/api/suggestions";

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    #[serde(default)]
    suggestions: Vec<serde_json::Value>,
}

/// A one-shot batch of display-ready suggestions.
#[derive(Debug, Default)]
pub struct SuggestionBatch {
    items: std::vec::IntoIter<String>,
}

impl SuggestionBatch {
    pub(crate) fn new(items: Vec<String>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    /// No suggestions left: the host should hide the suggestion surface.
    pub fn is_empty(&self) -> bool {
        self.items.as_slice().is_empty()
    }
}

impl Iterator for SuggestionBatch {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for SuggestionBatch {}

/// Fetches suggestions from `GET /api/suggestions`.
#[derive(Debug, Clone)]
pub struct SuggestionService {
    client: reqwest::Client,
    endpoint: String,
    site_name: String,
    collections: String,
    search_fields: String,
}

impl SuggestionService {
    pub fn new(client: reqwest::Client, config: &WidgetConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(SUGGESTIONS_PATH),
            site_name: config.site_name.clone(),
            collections: encode_list(&config.collections),
            search_fields: encode_list(&config.search_fields),
        }
    }

    /// Fetch suggestions for a partial query.
    ///
    /// Blank queries return an empty batch without a network call. Network
    /// errors, non-success statuses and undecodable bodies are logged and
    /// return an empty batch.
    pub async fn fetch_suggestions(&self, query: &str) -> SuggestionBatch {
        let query = query.trim();
        if query.is_empty() {
            return SuggestionBatch::default();
        }

        match self.fetch(query).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "suggestions received");
                SuggestionBatch::new(items)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch suggestions");
                SuggestionBatch::default()
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<String>, WidgetError> {
        tracing::trace!(query, "suggestion request");

        let request = self.client.get(&self.endpoint).query(&[
            ("query", query),
            ("siteName", self.site_name.as_str()),
            ("collections", self.collections.as_str()),
            ("searchFields", self.search_fields.as_str()),
        ]);

        let body = http::send_json(request, "suggestions")
            .await?
            .ok_or_else(|| WidgetError::Http("suggestions returned non-success status".into()))?;
        let response: SuggestionResponse = serde_json::from_value(body)
            .map_err(|e| WidgetError::Parse(format!("suggestions response: {e}")))?;

        Ok(response
            .suggestions
            .into_iter()
            .filter_map(|value| value.as_str().map(prepare_suggestion))
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Strip markup and title-case a raw suggestion.
pub fn prepare_suggestion(raw: &str) -> String {
    to_title_case(&sanitize_text(raw))
}

/// Return only the text content of an HTML fragment.
pub fn sanitize_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment.root_element().text().collect::<String>()
}

/// Uppercase the first letter or digit of every whitespace-delimited token
/// and lowercase the rest. Leading punctuation and whitespace are preserved.
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start && !(ch.is_alphanumeric() || ch == '_') {
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> SuggestionService {
        let config = WidgetConfig {
            api_base_url: server.uri(),
            site_name: "acme".into(),
            collections: vec!["blog".into()],
            ..Default::default()
        };
        SuggestionService::new(build_client(&config).expect("client"), &config)
    }

    #[test]
    fn title_case_normalises_each_token() {
        assert_eq!(to_title_case("hELLO wORLD"), "Hello World");
        assert_eq!(to_title_case("rust  lang"), "Rust  Lang");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn title_case_handles_punctuation_tokens() {
        assert_eq!(to_title_case("o'neil-SMITH"), "O'neil-smith");
        assert_eq!(to_title_case("(new) ARRIVALS"), "(New) Arrivals");
    }

    #[test]
    fn sanitize_strips_markup() {
        assert_eq!(sanitize_text("<b>red</b> shoes"), "red shoes");
        assert_eq!(sanitize_text("<script>x</script>"), "x");
        assert_eq!(sanitize_text("plain"), "plain");
    }

    #[test]
    fn prepare_combines_sanitise_and_title_case() {
        assert_eq!(prepare_suggestion("<em>RED</em> shoes"), "Red Shoes");
    }

    #[tokio::test]
    async fn blank_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let batch = service_for(&server).fetch_suggestions("   ").await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn suggestions_are_cleaned_and_kept_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUGGESTIONS_PATH))
            .and(query_param("query", "re"))
            .and(query_param("siteName", "acme"))
            .and(query_param("collections", r#"["blog"]"#))
            .and(query_param("searchFields", "[]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "suggestions": ["<mark>re</mark>d shoes", "RED SHOES", "<i></i>", "return policy"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let batch = service_for(&server).fetch_suggestions(" re ").await;
        assert_eq!(batch.len(), 3);
        let items: Vec<String> = batch.collect();
        // Case variants collapse to the same text but are not deduplicated.
        assert_eq!(items, vec!["Red Shoes", "Red Shoes", "Return Policy"]);
    }

    #[tokio::test]
    async fn non_success_hides_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUGGESTIONS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(service_for(&server).fetch_suggestions("re").await.is_empty());
    }

    #[tokio::test]
    async fn missing_suggestions_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUGGESTIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        assert!(service_for(&server).fetch_suggestions("re").await.is_empty());
    }
}
