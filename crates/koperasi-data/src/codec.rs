//! Stored JSON form of the record collections.
//!
//! Collections are persisted as ordered JSON lists. Inside the application a
//! user collection is handled as a [`UserDirectory`], keyed by id, and only
//! flattened back to a list at the storage boundary.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;
use crate::records::{Transaction, User};

const USERS: &str = "users";
const TRANSACTIONS: &str = "transactions";

/// Serializes a user collection to its stored form.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_users(users: &[User]) -> Result<String, CodecError> {
    encode(USERS, users)
}

/// Serializes a transaction collection to its stored form.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String, CodecError> {
    encode(TRANSACTIONS, transactions)
}

/// Parses a stored user collection.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if the payload is not a list of users.
///
/// # Example
///
/// ```
/// use koperasi_data::{decode_users, encode_users, seed_users};
///
/// let json = encode_users(&seed_users()).expect("encode");
/// let users = decode_users(&json).expect("decode");
/// assert_eq!(users, seed_users());
/// ```
pub fn decode_users(json: &str) -> Result<Vec<User>, CodecError> {
    decode(USERS, json)
}

/// Parses a stored transaction collection.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if the payload is not a list of
/// transactions.
pub fn decode_transactions(json: &str) -> Result<Vec<Transaction>, CodecError> {
    decode(TRANSACTIONS, json)
}

fn encode<T: Serialize>(collection: &'static str, records: &[T]) -> Result<String, CodecError> {
    serde_json::to_string(records).map_err(|e| CodecError::Encode {
        collection,
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(collection: &'static str, json: &str) -> Result<Vec<T>, CodecError> {
    serde_json::from_str(json).map_err(|e| CodecError::Malformed {
        collection,
        message: e.to_string(),
    })
}

/// Users keyed by id, remembering the order of the stored list.
///
/// When a stored list repeats an id, lookups and replacements address the
/// first occurrence; later duplicates are carried through unchanged.
///
/// # Example
///
/// ```
/// use koperasi_data::{Rupiah, UserDirectory, seed_users};
///
/// let mut directory = UserDirectory::from_records(seed_users());
/// let mut john = directory.get(2).cloned().expect("john is seeded");
/// john.savings = Rupiah::new(6_000_000);
///
/// assert!(directory.replace(john));
/// assert_eq!(
///     directory.get(2).map(|user| user.savings),
///     Some(Rupiah::new(6_000_000))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    records: Vec<User>,
    first_index: HashMap<u64, usize>,
}

impl UserDirectory {
    /// Builds a directory from a stored list.
    ///
    /// Every record is kept. When ids repeat, the first occurrence is the one
    /// lookups and replacements address.
    #[must_use]
    pub fn from_records(records: Vec<User>) -> Self {
        let mut first_index = HashMap::with_capacity(records.len());
        for (idx, user) in records.iter().enumerate() {
            first_index.entry(user.id).or_insert(idx);
        }
        Self {
            records,
            first_index,
        }
    }

    /// Looks a user up by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&User> {
        let idx = self.first_index.get(&id)?;
        self.records.get(*idx)
    }

    /// Replaces the record with the same id, keeping its position.
    ///
    /// Returns `false`, leaving the directory untouched, when no record has
    /// that id.
    pub fn replace(&mut self, user: User) -> bool {
        let Some(slot) = self
            .first_index
            .get(&user.id)
            .and_then(|idx| self.records.get_mut(*idx))
        else {
            return false;
        };
        *slot = user;
        true
    }

    /// Number of records held, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no users are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates users in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.records.iter()
    }

    /// Flattens the directory back into the stored list order.
    #[must_use]
    pub fn into_records(self) -> Vec<User> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::records::{Role, Rupiah};
    use crate::seed::{seed_transactions, seed_users};

    #[test]
    fn encoded_users_are_a_json_list() {
        let json = encode_users(&seed_users()).expect("encode");
        assert!(json.starts_with('['));
        assert!(json.contains("\"username\":\"john\""));
    }

    #[test]
    fn transactions_survive_encoding() {
        let json = encode_transactions(&seed_transactions()).expect("encode");
        let decoded = decode_transactions(&json).expect("decode");
        assert_eq!(decoded, seed_transactions());
    }

    #[rstest]
    #[case::not_json("not valid json")]
    #[case::object_not_list(r#"{"id": 1}"#)]
    #[case::missing_username(
        r#"[{"id": 1, "password": "x", "role": "admin", "name": "A", "email": "a@b"}]"#
    )]
    #[case::unknown_role(
        r#"[{"id": 1, "username": "a", "password": "x", "role": "root", "name": "A", "email": "a@b"}]"#
    )]
    #[case::negative_balance(
        r#"[{"id": 1, "username": "a", "password": "x", "role": "member", "name": "A", "email": "a@b", "simpanan": -5}]"#
    )]
    fn rejects_malformed_user_payloads(#[case] json: &str) {
        let result = decode_users(json);
        assert!(matches!(
            result,
            Err(CodecError::Malformed {
                collection: "users",
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_transaction_dates() {
        let json = r#"[{"id": 1, "userId": 2, "type": "simpanan", "amount": 10, "date": "15/01/2024", "status": "completed"}]"#;
        let result = decode_transactions(json);
        assert!(matches!(
            result,
            Err(CodecError::Malformed {
                collection: "transactions",
                ..
            })
        ));
    }

    #[test]
    fn directory_keeps_stored_order() {
        let directory = UserDirectory::from_records(seed_users());
        let ids: Vec<u64> = directory.iter().map(|user| user.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert_eq!(directory.into_records(), seed_users());
    }

    #[test]
    fn directory_replace_is_a_no_op_for_unknown_ids() {
        let mut directory = UserDirectory::from_records(seed_users());
        let stranger = User::new(99, "ghost", "x", Role::Member, "Ghost", "ghost@email.com");

        assert!(!directory.replace(stranger));
        assert_eq!(directory.into_records(), seed_users());
    }

    #[test]
    fn directory_addresses_first_of_duplicate_ids() {
        let first = User::new(5, "dup", "a", Role::Member, "First", "first@email.com");
        let second = User::new(5, "dup2", "b", Role::Member, "Second", "second@email.com");
        let mut directory = UserDirectory::from_records(vec![first.clone(), second.clone()]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get(5), Some(&first));

        let mut renamed = first;
        renamed.name = "Renamed".to_owned();
        assert!(directory.replace(renamed.clone()));
        assert_eq!(directory.into_records(), vec![renamed, second]);
    }

    #[test]
    fn replacing_another_id_keeps_duplicates() {
        let first = User::new(5, "dup", "a", Role::Member, "First", "first@email.com");
        let second = User::new(5, "dup2", "b", Role::Member, "Second", "second@email.com");
        let other = User::new(6, "other", "c", Role::Member, "Other", "other@email.com");
        let mut directory =
            UserDirectory::from_records(vec![first.clone(), second.clone(), other.clone()]);

        let mut richer = other;
        richer.savings = Rupiah::new(10);
        assert!(directory.replace(richer.clone()));

        assert_eq!(directory.into_records(), vec![first, second, richer]);
    }

    #[test]
    fn empty_directory_reports_empty() {
        let directory = UserDirectory::from_records(Vec::new());
        assert!(directory.is_empty());
        assert!(directory.into_records().is_empty());
    }
}
