//! Core types for result records, source identification and search outcomes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// User-facing text shown when a search completes with no records.
pub const EMPTY_STATE_MESSAGE: &str = "No results found.";

/// User-facing text shown when a search fails unexpectedly.
pub const ERROR_MESSAGE: &str = "Error performing search. Please try again later.";

/// Which backend index a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    /// The index over the site's own rendered pages.
    Page,
    /// The index over structured collection (CMS) items.
    Cms,
}

impl SourceTag {
    /// Returns the wire name of this tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Cms => "cms",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which backend indexes a search should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceSelection {
    /// Page index only.
    Pages,
    /// Collection index only.
    Collection,
    /// Both indexes, page results first.
    #[default]
    Both,
}

impl SourceSelection {
    /// Parse the host attribute value (`Pages`, `Collection`, `Both`).
    ///
    /// Returns `None` when the value is not recognised; the caller picks
    /// the fallback.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "Pages" => Some(Self::Pages),
            "Collection" => Some(Self::Collection),
            "Both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Whether the page index is queried.
    pub fn includes_pages(&self) -> bool {
        matches!(self, Self::Pages | Self::Both)
    }

    /// Whether the collection index is queried.
    pub fn includes_collection(&self) -> bool {
        matches!(self, Self::Collection | Self::Both)
    }
}

/// Field names with special meaning during rendering.
pub mod fields {
    pub const NAME: &str = "name";
    pub const TITLE: &str = "title";
    pub const MATCHED_TEXT: &str = "matchedText";
    pub const PUBLISHED_PATH: &str = "publishedPath";
    pub const SLUG: &str = "slug";
    pub const DETAIL_URL: &str = "detailUrl";

    /// Fields that are never rendered positionally.
    pub const RESERVED: &[&str] = &[NAME, TITLE, MATCHED_TEXT, PUBLISHED_PATH, SLUG, DETAIL_URL];
}

/// A single schema-less record returned by a backend index.
///
/// Field order is the order the backend sent them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord(Map<String, Value>);

impl ResultRecord {
    /// Wrap an already-decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value, returning `None` for non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw access to a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the field as display text if it is a non-empty string or a number.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display title: first non-empty of `name`, `title`.
    pub fn title(&self) -> Option<String> {
        self.text(fields::NAME).or_else(|| self.text(fields::TITLE))
    }

    /// Link target for a record from the given source.
    pub fn link(&self, tag: SourceTag) -> Option<String> {
        match tag {
            SourceTag::Page => self
                .text(fields::PUBLISHED_PATH)
                .or_else(|| self.text(fields::SLUG)),
            SourceTag::Cms => self.text(fields::DETAIL_URL),
        }
    }

    /// The highlighted snippet, when the backend supplied a non-empty one.
    pub fn matched_text(&self) -> Option<&str> {
        match self.0.get(fields::MATCHED_TEXT)? {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Every field that is rendered positionally, in original order.
    pub fn generic_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| !fields::RESERVED.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A record after merging, carrying the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedRecord {
    pub tag: SourceTag,
    pub record: ResultRecord,
}

impl TaggedRecord {
    pub fn new(tag: SourceTag, record: ResultRecord) -> Self {
        Self { tag, record }
    }
}

/// Merged results in arrival order: page records, then collection records.
pub type ResultSet = Vec<TaggedRecord>;

/// What the host should show after a search completes.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// The resolved query was empty; nothing was requested or changed.
    Skip,
    /// Render these records through the result renderer.
    Results(ResultSet),
    /// Both sources returned nothing.
    EmptyState,
    /// An unexpected error occurred while processing the responses.
    Error,
}

/// Lifecycle of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Rendered,
    Failed,
}
