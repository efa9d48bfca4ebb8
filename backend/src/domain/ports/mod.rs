//! Domain ports defining the edges of the hexagon.
//!
//! The record store talks to durable storage only through these traits, so
//! adapters (an in-memory map, a directory of JSON files) can be swapped
//! without touching domain code.

mod key_value_store;

pub use key_value_store::{KeyValueStore, KeyValueStoreError};

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
