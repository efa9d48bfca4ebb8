//! Outbound adapters implementing domain ports for durable storage.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the [`KeyValueStore`](crate::domain::ports::KeyValueStore)
//! port:
//!
//! - **memory**: a map held in process memory, used by tests and demos
//! - **file_store**: one JSON file per key inside a capability directory
//!
//! Adapters are thin translators between keys and their backing medium. They
//! contain no business logic.

pub mod file_store;
pub mod memory;
