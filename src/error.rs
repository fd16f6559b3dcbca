//! Error types for the sitesearch host.

/// Top-level error type for the headless host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the widget core.
    #[error(transparent)]
    Core(#[from] sitesearch_core::WidgetError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HostError>;
