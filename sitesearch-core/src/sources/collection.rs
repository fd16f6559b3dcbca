//! Collection index: search over structured CMS items with configurable
//! searchable and displayable fields.

use crate::config::{encode_list, WidgetConfig};
use crate::error::WidgetError;
use crate::source::IndexSource;
use crate::types::{ResultRecord, SourceTag};

/// Path of the collection index endpoint.
pub const SEARCH_CMS_PATH: &str = "/api/search-cms";

/// Client for
/// `GET /api/search-cms?query&siteName&collections&searchFields&displayFields`.
///
/// The collection and field lists are sent as JSON-encoded arrays.
#[derive(Debug, Clone)]
pub struct CollectionIndex {
    client: reqwest::Client,
    endpoint: String,
    site_name: String,
    collections: String,
    search_fields: String,
    display_fields: String,
}

impl CollectionIndex {
    pub fn new(client: reqwest::Client, config: &WidgetConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(SEARCH_CMS_PATH),
            site_name: config.site_name.clone(),
            collections: encode_list(&config.collections),
            search_fields: encode_list(&config.search_fields),
            display_fields: encode_list(&config.display_fields),
        }
    }
}

impl IndexSource for CollectionIndex {
    async fn query(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<Vec<ResultRecord>, WidgetError> {
        tracing::trace!(query, "collection index search");

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", query),
                ("siteName", self.site_name.as_str()),
                ("collections", self.collections.as_str()),
                ("searchFields", self.search_fields.as_str()),
                ("displayFields", self.display_fields.as_str()),
            ])
            .bearer_auth(token.unwrap_or_default());

        let records = super::fetch_results(request, "search-cms").await?;
        tracing::debug!(count = records.len(), "collection index results parsed");
        Ok(records)
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Cms
    }
}
