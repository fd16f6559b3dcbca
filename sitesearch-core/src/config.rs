//! Widget configuration with sensible defaults.
//!
//! [`WidgetConfig`] controls which backend indexes are queried and how
//! requests are made; [`RenderConfig`] controls layout, pagination and
//! styling of the rendered results. Both are read once per page load and
//! never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;
use crate::types::SourceSelection;

/// Default search backend.
pub const DEFAULT_API_BASE_URL: &str = "https://search-server.long-rain-28bb.workers.dev";

/// Default `chrono` format for ISO-8601 date fields (US-style date and time).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// How result items are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Cards in a CSS grid; the whole card is a link.
    Grid,
    /// Flat blocks; only the title is a link.
    #[default]
    List,
}

/// How the result set is split across views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaginationMode {
    /// Only the first page is shown, without controls.
    #[default]
    None,
    /// One button per page.
    Numbered,
    /// A single button that cumulatively reveals another page.
    #[serde(rename = "Load More")]
    LoadMore,
}

impl PaginationMode {
    fn from_attribute(value: &str) -> Self {
        match value.trim() {
            "Numbered" => Self::Numbered,
            "Load More" => Self::LoadMore,
            _ => Self::None,
        }
    }
}

/// How the search form is presented before first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchBarMode {
    /// The form is visible immediately.
    #[default]
    Expanded,
    /// The form is hidden behind an icon until the icon is activated.
    Icon,
}

impl SearchBarMode {
    /// Whether the host should show the search form on load.
    pub fn form_initially_visible(&self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// Colours, fonts and card decoration for rendered results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleBundle {
    pub title_font_size: String,
    pub title_font_family: String,
    pub title_color: String,
    /// Colour of every non-title field.
    pub other_fields_color: String,
    pub other_fields_font_size: String,
    pub border_radius: String,
    /// Drop shadow on grid cards.
    pub box_shadow: bool,
}

impl Default for StyleBundle {
    fn default() -> Self {
        Self {
            title_font_size: "16px".into(),
            title_font_family: "Arial".into(),
            title_color: "#000".into(),
            other_fields_color: "#333".into(),
            other_fields_font_size: "14px".into(),
            border_radius: "6px".into(),
            box_shadow: true,
        }
    }
}

/// Layout and pagination options for the result renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub display_mode: DisplayMode,
    /// Rows per page in grid mode.
    pub grid_rows: usize,
    /// Grid column count; also the page width in grid mode.
    pub grid_columns: usize,
    /// Page size in list mode. `0` disables pagination.
    pub items_per_page: usize,
    pub pagination: PaginationMode,
    /// `chrono` format string applied to ISO-8601 date fields.
    pub date_format: String,
    pub style: StyleBundle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::List,
            grid_rows: 1,
            grid_columns: 1,
            items_per_page: 10,
            pagination: PaginationMode::None,
            date_format: DEFAULT_DATE_FORMAT.into(),
            style: StyleBundle::default(),
        }
    }
}

impl RenderConfig {
    /// Number of records per page. `0` means everything renders on one page.
    pub fn page_size(&self) -> usize {
        match self.display_mode {
            DisplayMode::Grid => self.grid_rows.saturating_mul(self.grid_columns),
            DisplayMode::List => self.items_per_page,
        }
    }
}

/// Configuration for a widget instance.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Base URL of the search backend, without a trailing `/api`.
    pub api_base_url: String,
    /// Site identifier sent with every request.
    pub site_name: String,
    /// Which indexes a search queries.
    pub sources: SourceSelection,
    /// Collection names forwarded to the collection index and suggestions.
    pub collections: Vec<String>,
    /// Collection fields that are searched.
    pub search_fields: Vec<String>,
    /// Collection fields returned for display.
    pub display_fields: Vec<String>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent to the backend and reported during token issuance.
    pub user_agent: String,
    pub search_bar: SearchBarMode,
    pub render: RenderConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            site_name: "localhost".into(),
            sources: SourceSelection::Both,
            collections: Vec::new(),
            search_fields: Vec::new(),
            display_fields: Vec::new(),
            timeout_seconds: 10,
            user_agent: concat!("sitesearch/", env!("CARGO_PKG_VERSION")).into(),
            search_bar: SearchBarMode::Expanded,
            render: RenderConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `api_base_url` must not be empty
    /// - `site_name` must not be empty
    /// - `timeout_seconds` must be greater than 0
    /// - grid mode needs at least one column
    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.api_base_url.trim().is_empty() {
            return Err(WidgetError::Config(
                "api_base_url must not be empty".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(WidgetError::Config("site_name must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(WidgetError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.render.display_mode == DisplayMode::Grid && self.render.grid_columns == 0 {
            return Err(WidgetError::Config(
                "grid_columns must be greater than 0 in grid mode".into(),
            ));
        }
        Ok(())
    }

    /// Build a configuration from the host page's `data-*` attributes.
    ///
    /// Missing attributes fall back to the widget defaults. Numeric
    /// attributes that are missing, unparsable or zero use their defaults
    /// (rows 1, columns 1, items per page 10). Box shadow is enabled only
    /// when the attribute is literally `true`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] if a list attribute is not a JSON
    /// array of strings.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Result<Self, WidgetError> {
        let get = |name: &str| attrs.get(name).map(String::as_str);
        let text = |name: &str, default: &str| {
            get(name)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_owned()
        };
        let count = |name: &str, default: usize| {
            get(name)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };

        let style_defaults = StyleBundle::default();
        let style = StyleBundle {
            title_font_size: text("data-title-font-size", &style_defaults.title_font_size),
            title_font_family: text("data-title-font-family", &style_defaults.title_font_family),
            title_color: text("data-title-color", &style_defaults.title_color),
            other_fields_color: text("data-other-fields-color", &style_defaults.other_fields_color),
            other_fields_font_size: text(
                "data-other-fields-font-size",
                &style_defaults.other_fields_font_size,
            ),
            border_radius: text("data-border-radius", &style_defaults.border_radius),
            box_shadow: get("data-box-shadow") == Some("true"),
        };

        let render = RenderConfig {
            display_mode: if get("data-display-mode") == Some("Grid") {
                DisplayMode::Grid
            } else {
                DisplayMode::List
            },
            grid_rows: count("data-grid-rows", 1),
            grid_columns: count("data-grid-columns", 1),
            items_per_page: count("data-items-per-page", 10),
            pagination: get("data-pagination-type")
                .map(PaginationMode::from_attribute)
                .unwrap_or_default(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            style,
        };

        Ok(Self {
            sources: get("data-selected-option")
                .and_then(SourceSelection::from_attribute)
                .unwrap_or_default(),
            collections: json_list(attrs, "data-selected-collections")?,
            search_fields: json_list(attrs, "data-selected-fields-search")?,
            display_fields: json_list(attrs, "data-selected-fields-display")?,
            search_bar: if get("data-search-bar") == Some("Icon") {
                SearchBarMode::Icon
            } else {
                SearchBarMode::Expanded
            },
            render,
            ..Self::default()
        })
    }

    /// Set the site identifier, typically from [`crate::location::PageLocation`].
    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Full URL of a backend endpoint such as `/api/search-index`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

/// Parse a JSON array attribute, treating a missing or empty attribute as `[]`.
fn json_list(attrs: &HashMap<String, String>, name: &str) -> Result<Vec<String>, WidgetError> {
    match attrs.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| WidgetError::Config(format!("{name} is not a JSON string array: {e}"))),
    }
}

/// Encode a list the way the backend expects it in query parameters.
pub(crate) fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".into())
}
