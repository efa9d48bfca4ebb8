//! Records, seed dataset and stored form of the koperasi demo.
//!
//! This crate holds everything about the cooperative's data that does not
//! depend on where it is kept: the user and transaction record types, the
//! fixed dataset a fresh store starts from, the JSON list codec used for
//! persisted collections, and an atomic file write helper for file-backed
//! stores.
//!
//! # Example
//!
//! ```
//! use koperasi_data::{Role, decode_users, encode_users, seed_users};
//!
//! let stored = encode_users(&seed_users()).expect("encode");
//! let users = decode_users(&stored).expect("decode");
//!
//! let members = users.iter().filter(|user| user.role == Role::Member).count();
//! assert_eq!(members, 3);
//! ```

mod atomic_io;
mod codec;
mod error;
mod records;
mod seed;

pub use atomic_io::write_atomic;
pub use codec::{
    UserDirectory, decode_transactions, decode_users, encode_transactions, encode_users,
};
pub use error::{AtomicWriteError, CodecError};
pub use records::{Role, Rupiah, Transaction, TransactionKind, TransactionStatus, User};
pub use seed::{seed_transactions, seed_users};
