//! # sitesearch-core
//!
//! Query orchestration and result rendering for an embeddable site search
//! widget.
//!
//! The host page supplies configuration, a query and a place to put markup;
//! this crate does everything in between.
//!
//! ## Design
//!
//! - Session tokens are cached in an injected [`KeyValueStore`] and
//!   reissued only when missing, malformed or expired
//! - The page index and the collection index are queried concurrently and
//!   merged in a fixed order (pages first), with no ranking
//! - A failing source contributes no results instead of failing the search
//! - Rendering is a pure function producing a render tree plus declarative
//!   interaction bindings; pagination never re-fetches
//! - Autocomplete suggestions are stripped of markup and title-cased
//!
//! ## Security
//!
//! - All record text and attribute values are HTML-escaped on output
//! - Queries are logged only at trace level
//! - Tokens never appear in logs or error messages

pub mod config;
pub mod error;
pub mod http;
pub mod location;
pub mod orchestrator;
pub mod render;
pub mod source;
pub mod sources;
pub mod store;
pub mod suggest;
pub mod token;
pub mod types;

pub use config::{DisplayMode, PaginationMode, RenderConfig, SearchBarMode, StyleBundle, WidgetConfig};
pub use error::{Result, WidgetError};
pub use location::PageLocation;
pub use orchestrator::{ResultsDisplay, SearchOrchestrator};
pub use render::{render, Binding, Interaction, Node, PaginationState, RenderOutput, ResultsView};
pub use source::IndexSource;
pub use store::{KeyValueStore, MemoryStore};
pub use suggest::{SuggestionBatch, SuggestionService};
pub use token::TokenStore;
pub use types::{
    RenderInstruction, ResultRecord, ResultSet, SearchState, SourceSelection, SourceTag,
    TaggedRecord,
};

/// Run a single search with a throwaway in-memory token cache.
///
/// A token is issued for this call only. Hosts that search repeatedly
/// should keep a [`SearchOrchestrator`] with a persistent store instead.
///
/// # Errors
///
/// Returns [`WidgetError::Config`] if `config` is invalid. Search failures
/// are reported through [`RenderInstruction::Error`], not as `Err`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sitesearch_core::Result<()> {
/// let config = sitesearch_core::WidgetConfig::default().with_site_name("acme");
/// match sitesearch_core::search("red shoes", &config).await? {
///     sitesearch_core::RenderInstruction::Results(results) => {
///         println!("{} results", results.len());
///     }
///     other => println!("{other:?}"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &WidgetConfig) -> Result<RenderInstruction> {
    let orchestrator = SearchOrchestrator::new(config.clone(), MemoryStore::new())?;
    Ok(orchestrator.run_search(query).await)
}
