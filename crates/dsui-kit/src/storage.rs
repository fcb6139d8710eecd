#![forbid(unsafe_code)]

//! Key/value persistence for UI preferences.
//!
//! The browser binding backs this with `localStorage`; [`MemStorage`] keeps
//! values in memory. Writes may fail (quota, privacy mode); callers log and
//! carry on.

use ahash::AHashMap;
use dsui_dom::DomError;

/// String key/value store.
pub trait Storage {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomError>;
}

/// In-memory [`Storage`].
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    values: AHashMap<String, String>,
}

impl MemStorage {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    #[must_use]
    pub fn with<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Storage for MemStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
