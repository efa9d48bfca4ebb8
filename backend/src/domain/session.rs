//! Page-session state: who is signed in and which view they see.
//!
//! The session keeps its own copy of the signed-in user. The copy can drift
//! from the store after a mutation until [`Session::reload`] re-reads it.

use koperasi_data::{Role, User};

use super::auth::{AuthError, LoginCredentials, authenticate};
use super::ports::KeyValueStore;
use super::record_store::RecordStore;

/// Screen to show for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Nobody is signed in.
    Login,
    /// An administrator is signed in.
    AdminDashboard,
    /// A member is signed in.
    MemberDashboard,
}

/// Signed-in user for one page session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Start with nobody signed in.
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Authenticate and remember the user on success.
    ///
    /// A failed attempt leaves the session as it was.
    ///
    /// # Examples
    /// ```
    /// use koperasi::domain::{LoginCredentials, RecordStore, Session, View};
    /// use koperasi::outbound::memory::InMemoryKeyValueStore;
    ///
    /// let records = RecordStore::new(InMemoryKeyValueStore::new());
    /// let mut session = Session::new();
    /// let creds = LoginCredentials::try_from_parts("admin", "admin123").unwrap();
    ///
    /// session.login(&records, &creds).unwrap();
    /// assert_eq!(session.view(), View::AdminDashboard);
    /// ```
    pub fn login<S: KeyValueStore>(
        &mut self,
        records: &RecordStore<S>,
        credentials: &LoginCredentials,
    ) -> Result<&User, AuthError> {
        let user = authenticate(records, credentials)?;
        Ok(&*self.user.insert(user))
    }

    /// Forget the signed-in user.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// The session's copy of the signed-in user.
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Screen chosen by the signed-in user's role.
    pub fn view(&self) -> View {
        match self.user.as_ref().map(|user| user.role) {
            None => View::Login,
            Some(Role::Admin) => View::AdminDashboard,
            Some(Role::Member) => View::MemberDashboard,
        }
    }

    /// Replace the user copy with the stored record.
    ///
    /// Keeps the existing copy when the store no longer knows the id.
    pub fn reload<S: KeyValueStore>(&mut self, records: &RecordStore<S>) {
        let Some(current) = self.user.as_mut() else {
            return;
        };
        if let Some(stored) = records.find_user(current.id) {
            *current = stored;
        }
    }
}
