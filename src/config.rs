//! Host configuration file.
//!
//! ```toml
//! [widget]
//! api_base_url = "https://search.example.com"
//! site_name = "acme"
//! sources = "Both"
//!
//! [widget.render]
//! display_mode = "Grid"
//! grid_columns = 3
//! pagination = "Numbered"
//!
//! [widget.render.style]
//! title_color = "#111"
//!
//! [host]
//! page_url = "https://www.acme.com/search-app-results"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sitesearch_core::{PageLocation, WidgetConfig};

use crate::error::{HostError, Result};

/// Top-level configuration for the headless host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Widget settings passed to the core.
    pub widget: WidgetConfig,
    /// Host-only settings.
    pub host: HostSettings,
}

/// Settings that only affect the host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// URL of the page the widget is embedded in. When set, the site name
    /// is derived from its host.
    pub page_url: Option<String>,
    /// Session store path (None = `data_dir()/session.json`).
    pub store_path: Option<PathBuf>,
    /// Show a spinner on stderr while searching.
    pub spinner: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            page_url: None,
            store_path: None,
            spinner: true,
        }
    }
}

impl HostConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HostError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/sitesearch/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("sitesearch").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("sitesearch")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/sitesearch-config/config.toml")
        }
    }

    /// Load from `path` if given, else from the default path if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_config_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse the configured page URL, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `host.page_url` is set but is not a valid URL.
    pub fn page_location(&self) -> Result<Option<PageLocation>> {
        self.host
            .page_url
            .as_deref()
            .map(PageLocation::parse)
            .transpose()
            .map_err(HostError::from)
    }

    /// The widget configuration with the site name taken from the page URL
    /// when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the page URL is invalid or the resulting widget
    /// configuration fails validation.
    pub fn resolved_widget(&self) -> Result<WidgetConfig> {
        let widget = match self.page_location()? {
            Some(location) => self.widget.clone().with_site_name(location.site_name),
            None => self.widget.clone(),
        };
        widget.validate()?;
        Ok(widget)
    }

    /// Session store path, falling back to the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.host
            .store_path
            .clone()
            .unwrap_or_else(crate::app_dirs::session_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesearch_core::{DisplayMode, PaginationMode, SourceSelection};

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = HostConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(HostError::Io(_))));
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        assert!(matches!(HostConfig::from_file(&path), Err(HostError::Config(_))));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
[widget]
site_name = "acme"
sources = "Pages"

[widget.render]
display_mode = "Grid"
grid_columns = 3
pagination = "Load More"

[widget.render.style]
title_color = "#111"
"##,
        )
        .expect("write");

        let config = HostConfig::from_file(&path).expect("parse");
        assert_eq!(config.widget.site_name, "acme");
        assert_eq!(config.widget.sources, SourceSelection::Pages);
        assert_eq!(config.widget.render.display_mode, DisplayMode::Grid);
        assert_eq!(config.widget.render.pagination, PaginationMode::LoadMore);
        assert_eq!(config.widget.render.grid_rows, 1);
        assert_eq!(config.widget.render.style.title_color, "#111");
        assert_eq!(config.widget.render.style.title_font_family, "Arial");
        assert_eq!(config.widget.timeout_seconds, 10);
        assert!(config.host.spinner);
    }

    #[test]
    fn save_and_reload_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = HostConfig::default();
        config.widget.collections = vec!["blog".into()];
        config.host.page_url = Some("https://www.acme.com/".into());

        config.save_to_file(&path).expect("save");
        assert_eq!(HostConfig::from_file(&path).expect("load"), config);
    }

    #[test]
    fn page_url_sets_site_name() {
        let mut config = HostConfig::default();
        config.host.page_url = Some("https://www.acme.com/search-app-results?q=x".into());
        assert_eq!(config.resolved_widget().expect("valid").site_name, "acme");
    }

    #[test]
    fn invalid_page_url_is_an_error() {
        let mut config = HostConfig::default();
        config.host.page_url = Some("not a url".into());
        assert!(config.resolved_widget().is_err());
    }

    #[test]
    fn explicit_store_path_wins() {
        let mut config = HostConfig::default();
        config.host.store_path = Some(PathBuf::from("/var/lib/s.json"));
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/s.json"));
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = HostConfig::default_config_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.ends_with("config.toml"));
        assert!(path_str.contains("sitesearch"));
    }
}
