//! Authentication against the stored user collection.
//!
//! Credentials are compared verbatim with the stored plaintext values. There
//! is no hashing, lockout or rate limiting; this module only reproduces the
//! cooperative demo's login contract.

use koperasi_data::User;
use thiserror::Error;
use zeroize::Zeroizing;

use super::ports::KeyValueStore;
use super::record_store::RecordStore;

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username was empty.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// No stored user has this username and password.
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Login credentials as typed by the user.
///
/// ## Invariants
/// - neither field is empty.
/// - values are kept exactly as supplied, whitespace included, because
///   lookups compare them verbatim.
///
/// # Examples
/// ```
/// use koperasi::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("john", "member123").unwrap();
/// assert_eq!(creds.username(), "john");
/// assert_eq!(creds.password(), "member123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthError> {
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    fn matches(&self, user: &User) -> bool {
        user.username == self.username() && user.password == self.password()
    }
}

/// Return the first stored user whose username and password both match.
///
/// Matching is exact and case-sensitive.
///
/// # Examples
/// ```
/// use koperasi::domain::{AuthError, LoginCredentials, RecordStore, authenticate};
/// use koperasi::outbound::memory::InMemoryKeyValueStore;
///
/// let records = RecordStore::new(InMemoryKeyValueStore::new());
/// let creds = LoginCredentials::try_from_parts("john", "member123").unwrap();
/// let user = authenticate(&records, &creds).unwrap();
/// assert_eq!(user.name, "John Doe");
///
/// let wrong = LoginCredentials::try_from_parts("john", "wrong").unwrap();
/// assert_eq!(authenticate(&records, &wrong), Err(AuthError::InvalidCredentials));
/// ```
pub fn authenticate<S: KeyValueStore>(
    records: &RecordStore<S>,
    credentials: &LoginCredentials,
) -> Result<User, AuthError> {
    records
        .users()
        .into_iter()
        .find(|user| credentials.matches(user))
        .ok_or(AuthError::InvalidCredentials)
}
