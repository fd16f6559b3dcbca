//! Trait definition for the backend indexes a search fans out to.
//!
//! The page index and the collection index each implement
//! [`IndexSource`]; the orchestrator is generic over it so tests can plug
//! in canned sources.

use crate::error::WidgetError;
use crate::types::{ResultRecord, SourceTag};

/// A backend index that answers search queries with schema-less records.
///
/// Implementations handle their own URL construction, authentication and
/// response decoding. A non-success HTTP status must be reported as
/// `Ok(vec![])`; only transport failures ([`WidgetError::Http`]) and
/// undecodable success bodies ([`WidgetError::Parse`]) are errors.
///
/// All implementations must be `Send + Sync` so both sources can be
/// queried concurrently.
pub trait IndexSource: Send + Sync {
    /// Query the index.
    ///
    /// # Arguments
    ///
    /// * `query`: the normalised search query.
    /// * `token`: bearer token; `None` sends an empty bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Http`] on transport failure or
    /// [`WidgetError::Parse`] when a successful response is not JSON.
    fn query(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<ResultRecord>, WidgetError>> + Send;

    /// Which tag records from this source carry after merging.
    fn tag(&self) -> SourceTag;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A canned source for exercising trait bounds and async execution.
    struct CannedSource {
        tag: SourceTag,
        outcome: Result<Vec<ResultRecord>, String>,
    }

    impl IndexSource for CannedSource {
        async fn query(
            &self,
            _query: &str,
            _token: Option<&str>,
        ) -> Result<Vec<ResultRecord>, WidgetError> {
            self.outcome.clone().map_err(WidgetError::Http)
        }

        fn tag(&self) -> SourceTag {
            self.tag
        }
    }

    #[test]
    fn canned_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CannedSource>();
    }

    #[tokio::test]
    async fn canned_source_returns_records() {
        let record = ResultRecord::from_value(json!({"name": "Doc"})).expect("object");
        let source = CannedSource {
            tag: SourceTag::Page,
            outcome: Ok(vec![record]),
        };
        let records = source.query("doc", None).await.expect("should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title().as_deref(), Some("Doc"));
        assert_eq!(source.tag(), SourceTag::Page);
    }

    #[tokio::test]
    async fn canned_source_propagates_errors() {
        let source = CannedSource {
            tag: SourceTag::Cms,
            outcome: Err("connection reset".into()),
        };
        let err = source.query("doc", Some("t")).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
