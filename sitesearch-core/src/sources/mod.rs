//! Backend index implementations.
//!
//! Each module provides a struct implementing [`crate::source::IndexSource`]
//! for one of the two search endpoints.

pub mod collection;
pub mod page;

pub use collection::CollectionIndex;
pub use page::PageIndex;

use serde_json::Value;

use crate::error::WidgetError;
use crate::http;
use crate::types::ResultRecord;

/// Send an index request and decode its `results` array.
///
/// A non-success status yields no records. A body whose `results` is
/// missing or not an array also yields no records; non-object entries in
/// the array are skipped.
pub(crate) async fn fetch_results(
    request: reqwest::RequestBuilder,
    label: &str,
) -> Result<Vec<ResultRecord>, WidgetError> {
    match http::send_json(request, label).await? {
        Some(body) => Ok(parse_results(body)),
        None => {
            tracing::warn!(label, "index returned non-success status, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Extract records from a decoded `{results: [...]}` body.
pub(crate) fn parse_results(body: Value) -> Vec<ResultRecord> {
    let Value::Object(mut map) = body else {
        return Vec::new();
    };
    match map.remove("results") {
        Some(Value::Array(items)) => items.into_iter().filter_map(ResultRecord::from_value).collect(),
        _ => Vec::new(),
    }
}
