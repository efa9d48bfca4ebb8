//! Port abstraction for origin-scoped key-value storage.
//!
//! This mirrors the storage a browser gives a single origin: string values
//! under string keys, read and written synchronously by one actor at a time.

use thiserror::Error;

/// Errors raised by key-value store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyValueStoreError {
    /// The value under `key` could not be read.
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },
    /// The value under `key` could not be written.
    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },
}

impl KeyValueStoreError {
    /// Build a [`KeyValueStoreError::Read`].
    pub fn read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Build a [`KeyValueStoreError::Write`].
    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Durable string storage addressed by fixed keys.
///
/// Implementations use interior mutability; callers share a store by
/// reference. Last writer wins and nothing is locked.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Return the value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}
