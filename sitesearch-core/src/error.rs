//! Error types for the sitesearch-core crate.
//!
//! Messages are stable strings suitable for logs. Bearer tokens and visitor
//! identifiers never appear in error messages.

/// Errors that can occur while talking to the search backend or preparing
/// widget state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetError {
    /// A request to the search backend failed at the transport level or
    /// returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend response or cached credential could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid widget configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The persisted key-value store rejected a read or write.
    #[error("store error: {0}")]
    Store(String),
}

/// Convenience type alias for sitesearch-core results.
pub type Result<T> = std::result::Result<T, WidgetError>;
