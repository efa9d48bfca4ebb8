//! Savings and loan records for a small cooperative.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the rules and the
//! [`domain::ports::KeyValueStore`] port, [`outbound`] provides storage
//! adapters and [`inbound`] the command-line front end.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::KoperasiSettings;
