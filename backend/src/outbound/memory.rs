//! In-memory key-value store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store backed by a map in process memory.
///
/// Values live as long as the store does, matching a single page session.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RefCell::new(map),
        }
    }

    /// Copy of the raw value under `key`, bypassing the port.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Returns `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn missing_keys_read_as_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("koperasi_users"), Ok(None));
    }

    #[test]
    fn last_write_wins() {
        let store = InMemoryKeyValueStore::new();
        store.set("koperasi_users", "[]").expect("first write");
        store.set("koperasi_users", "[1]").expect("second write");

        assert_eq!(store.get("koperasi_users"), Ok(Some("[1]".to_owned())));
    }

    #[test]
    fn prepopulated_entries_are_visible() {
        let store = InMemoryKeyValueStore::with_entries([("koperasi_transactions", "[]")]);
        assert!(!store.is_empty());
        assert_eq!(store.value("koperasi_transactions").as_deref(), Some("[]"));
    }
}
