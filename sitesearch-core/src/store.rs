//! Persisted key-value storage for the visitor identity and session token.
//!
//! The host supplies the real backing store (browser storage, a file, a
//! keychain). [`MemoryStore`] is the in-process implementation used in
//! tests and short-lived hosts.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::WidgetError;

/// Key under which the visitor identity is stored.
pub const VISITOR_ID_KEY: &str = "visitorId";

/// Key under which the session token is stored.
pub const SESSION_TOKEN_KEY: &str = "visitorSessionToken";

/// String key-value storage that survives across page loads.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Unreadable entries are reported as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Store`] if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), WidgetError>;
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().ok()?;
        guard.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| WidgetError::Store("memory store lock poisoned".into()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        (**self).set(key, value)
    }
}
