//! Page index: full-text search over the site's own rendered pages.

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::source::IndexSource;
use crate::types::{ResultRecord, SourceTag};

/// Path of the page index endpoint.
pub const SEARCH_INDEX_PATH: &str = "/api/search-index";

/// Client for `GET /api/search-index?query&siteName`.
#[derive(Debug, Clone)]
pub struct PageIndex {
    client: reqwest::Client,
    endpoint: String,
    site_name: String,
}

impl PageIndex {
    pub fn new(client: reqwest::Client, config: &WidgetConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(SEARCH_INDEX_PATH),
            site_name: config.site_name.clone(),
        }
    }
}

impl IndexSource for PageIndex {
    async fn query(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<Vec<ResultRecord>, WidgetError> {
        tracing::trace!(query, "page index search");

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("siteName", self.site_name.as_str())])
            .bearer_auth(token.unwrap_or_default());

        let records = super::fetch_results(request, "search-index").await?;
        tracing::debug!(count = records.len(), "page index results parsed");
        Ok(records)
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Page
    }
}
