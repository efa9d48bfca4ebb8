//! Durable home of the user and transaction collections.
//!
//! Each collection is stored as one JSON list under a fixed key. Reads never
//! fail: a missing, unreadable or corrupt value falls back to the seed
//! dataset without writing it. Only [`RecordStore::initialize`] persists the
//! seeds.

use koperasi_data::{
    CodecError, Transaction, User, UserDirectory, decode_transactions, decode_users,
    encode_transactions, encode_users, seed_transactions, seed_users,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::ports::{KeyValueStore, KeyValueStoreError};

/// Storage key of the user collection.
pub const USERS_KEY: &str = "koperasi_users";
/// Storage key of the transaction collection.
pub const TRANSACTIONS_KEY: &str = "koperasi_transactions";

/// Errors raised when the record store cannot persist a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    /// The key-value backend rejected the write.
    #[error("record storage failed: {0}")]
    Storage(#[from] KeyValueStoreError),
    /// The collection could not be serialized.
    #[error("record encoding failed: {0}")]
    Encode(#[from] CodecError),
}

/// Reads and writes the two record collections through a [`KeyValueStore`].
///
/// # Examples
/// ```
/// use koperasi::domain::RecordStore;
/// use koperasi::outbound::memory::InMemoryKeyValueStore;
/// use koperasi_data::seed_users;
///
/// let records = RecordStore::new(InMemoryKeyValueStore::new());
/// records.initialize().expect("seed store");
/// assert_eq!(records.users(), seed_users());
/// ```
#[derive(Debug, Default)]
pub struct RecordStore<S> {
    store: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Wrap a key-value backend.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying backend.
    pub const fn backend(&self) -> &S {
        &self.store
    }

    /// Seed every collection that has no stored value yet.
    ///
    /// Collections that already hold data, valid or not, are left alone, so
    /// calling this again after mutations is a no-op. A key whose presence
    /// cannot be determined is skipped rather than overwritten.
    pub fn initialize(&self) -> Result<(), RecordStoreError> {
        self.seed_if_missing(USERS_KEY, || encode_users(&seed_users()))?;
        self.seed_if_missing(TRANSACTIONS_KEY, || {
            encode_transactions(&seed_transactions())
        })?;
        Ok(())
    }

    /// Current user collection, or the seed users when nothing usable is
    /// stored.
    pub fn users(&self) -> Vec<User> {
        self.load(USERS_KEY, decode_users, seed_users)
    }

    /// Current transaction ledger, or the seed ledger when nothing usable is
    /// stored.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.load(TRANSACTIONS_KEY, decode_transactions, seed_transactions)
    }

    /// Look a user up by id in the current collection.
    pub fn find_user(&self, id: u64) -> Option<User> {
        self.users().into_iter().find(|user| user.id == id)
    }

    /// Replace the stored user with the same id, keeping its position.
    ///
    /// Returns `Ok(false)` without writing when no user has that id.
    pub fn update_user(&self, user: &User) -> Result<bool, RecordStoreError> {
        let mut directory = UserDirectory::from_records(self.users());
        if !directory.replace(user.clone()) {
            debug!(user_id = user.id, "update for unknown user ignored");
            return Ok(false);
        }
        let payload = encode_users(&directory.into_records())?;
        self.store.set(USERS_KEY, &payload)?;
        Ok(true)
    }

    /// Append a transaction to the ledger.
    pub fn add_transaction(&self, transaction: Transaction) -> Result<(), RecordStoreError> {
        let mut transactions = self.transactions();
        transactions.push(transaction);
        let payload = encode_transactions(&transactions)?;
        self.store.set(TRANSACTIONS_KEY, &payload)?;
        Ok(())
    }

    fn seed_if_missing(
        &self,
        key: &str,
        encode_seed: impl FnOnce() -> Result<String, CodecError>,
    ) -> Result<(), RecordStoreError> {
        match self.store.get(key) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                let payload = encode_seed()?;
                self.store.set(key, &payload)?;
                info!(key, "seeded empty collection");
                Ok(())
            }
            Err(error) => {
                warn!(key, %error, "could not check stored collection; not seeding");
                Ok(())
            }
        }
    }

    fn load<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&str) -> Result<Vec<T>, CodecError>,
        seed: impl FnOnce() -> Vec<T>,
    ) -> Vec<T> {
        let stored = match self.store.get(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return seed(),
            Err(error) => {
                warn!(key, %error, "stored collection unreadable; using seed data");
                return seed();
            }
        };
        match decode(&stored) {
            Ok(records) => records,
            Err(error) => {
                warn!(key, %error, "stored collection corrupt; using seed data");
                seed()
            }
        }
    }
}
