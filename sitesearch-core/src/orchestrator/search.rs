//! Core search pipeline: concurrent dual-source fan-out, tag and merge.
//!
//! Both selected sources are queried concurrently and always settle before
//! the merge. A source that fails at the transport level contributes no
//! records; a source that answers with an undecodable body fails the whole
//! search.

use crate::error::WidgetError;
use crate::source::IndexSource;
use crate::types::{RenderInstruction, ResultRecord, ResultSet, SourceSelection, TaggedRecord};

/// Run one search against the selected sources.
///
/// # Pipeline
///
/// 1. Build one future per selected source; unselected sources resolve
///    immediately to no records
/// 2. Join both with [`futures::future::join`]
/// 3. Degrade transport failures to an empty source, logged at warn level
/// 4. Concatenate page records then collection records, tagging each
/// 5. Map the merged set to a [`RenderInstruction`]
///
/// `query` must already be normalised and non-empty.
pub async fn run_search<P, C>(
    query: &str,
    selection: SourceSelection,
    pages: &P,
    collection: &C,
    token: Option<&str>,
) -> RenderInstruction
where
    P: IndexSource,
    C: IndexSource,
{
    tracing::trace!(query, ?selection, "running search");

    let page_query = async {
        if selection.includes_pages() {
            settle(pages, pages.query(query, token).await)
        } else {
            Ok(Vec::new())
        }
    };
    let collection_query = async {
        if selection.includes_collection() {
            settle(collection, collection.query(query, token).await)
        } else {
            Ok(Vec::new())
        }
    };

    let (page_outcome, collection_outcome) =
        futures::future::join(page_query, collection_query).await;

    let merged = page_outcome.and_then(|page_records| {
        let collection_records = collection_outcome?;
        Ok(merge(
            tag_all(pages, page_records),
            tag_all(collection, collection_records),
        ))
    });

    match merged {
        Ok(results) if results.is_empty() => {
            tracing::debug!("search returned no results");
            RenderInstruction::EmptyState
        }
        Ok(results) => {
            tracing::debug!(count = results.len(), "search results merged");
            RenderInstruction::Results(results)
        }
        Err(err) => {
            tracing::error!(error = %err, "search failed");
            RenderInstruction::Error
        }
    }
}

/// Apply per-source failure tolerance.
///
/// Transport errors mean "no records from this source". Anything else is
/// an unexpected processing error and is propagated.
fn settle<S: IndexSource>(
    source: &S,
    outcome: Result<Vec<ResultRecord>, WidgetError>,
) -> Result<Vec<ResultRecord>, WidgetError> {
    match outcome {
        Ok(records) => {
            tracing::debug!(source = %source.tag(), count = records.len(), "source returned results");
            Ok(records)
        }
        Err(WidgetError::Http(reason)) => {
            tracing::warn!(source = %source.tag(), error = %reason, "source request failed, treating as empty");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

fn tag_all<S: IndexSource>(source: &S, records: Vec<ResultRecord>) -> ResultSet {
    let tag = source.tag();
    records
        .into_iter()
        .map(|record| TaggedRecord::new(tag, record))
        .collect()
}

/// Concatenate page results followed by collection results.
///
/// No interleaving, dedup or re-sorting.
pub fn merge(pages: ResultSet, collection: ResultSet) -> ResultSet {
    let mut merged = pages;
    merged.extend(collection);
    merged
}
