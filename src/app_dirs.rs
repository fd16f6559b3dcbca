//! Application directory paths for the sitesearch host.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/sitesearch/` | `~/.local/share/sitesearch/` |
//!
//! Set `SITESEARCH_DATA_DIR` to override the data directory, for testing
//! or custom deployments.

use std::path::PathBuf;

/// Environment variable overriding [`data_dir`].
pub const DATA_DIR_ENV: &str = "SITESEARCH_DATA_DIR";

/// File name of the persisted visitor identity and session token.
pub const SESSION_FILE: &str = "session.json";

/// Application data root directory.
///
/// Resolves to `dirs::data_dir()/sitesearch/` by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("sitesearch"))
        .unwrap_or_else(|| PathBuf::from("/tmp/sitesearch-data"))
}

/// Default location of the session store (`data_dir()/session.json`).
#[must_use]
pub fn session_path() -> PathBuf {
    data_dir().join(SESSION_FILE)
}
