//! Headless host for the embeddable site search widget.
//!
//! Provides what a page would otherwise supply to `sitesearch-core`: a
//! configuration file, a persisted session store and a display surface.

pub mod app_dirs;
pub mod config;
pub mod display;
pub mod error;
pub mod store;

pub use config::{HostConfig, HostSettings};
pub use display::ConsoleDisplay;
pub use error::{HostError, Result};
pub use store::FileStore;

use sitesearch_core::SearchOrchestrator;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "sitesearch=info,sitesearch_core=info";

/// Install the global tracing subscriber, writing to stderr.
///
/// Stdout is reserved for rendered markup.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Build an orchestrator backed by the configured session store.
///
/// # Errors
///
/// Returns an error if the widget configuration is invalid or the store
/// cannot be opened.
pub fn open_orchestrator(config: &HostConfig) -> Result<SearchOrchestrator<FileStore>> {
    let widget = config.resolved_widget()?;
    let store = FileStore::open(config.store_path())?;
    tracing::debug!(site = %widget.site_name, store = %store.path().display(), "opening widget");
    Ok(SearchOrchestrator::new(widget, store)?)
}
