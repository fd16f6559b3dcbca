//! JSON-file backed [`KeyValueStore`] for the visitor identity and token.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sitesearch_core::{KeyValueStore, WidgetError};

use crate::error::Result;

/// A key-value store persisted as a flat JSON object.
///
/// The file is read once on open and rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt file is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "session store is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session store unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().ok()?;
        guard.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), WidgetError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| WidgetError::Store("file store lock poisoned".into()))?;
        guard.insert(key.to_owned(), value.to_owned());
        let content = serde_json::to_string_pretty(&*guard)
            .map_err(|e| WidgetError::Store(format!("failed to encode session store: {e}")))?;
        std::fs::write(&self.path, content)
            .map_err(|e| WidgetError::Store(format!("failed to write {}: {e}", self.path.display())))
    }
}
