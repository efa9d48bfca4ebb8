//! Member dashboard state.
//!
//! Mirrors what the member view keeps between renders: the signed-in session,
//! a snapshot of the ledger and the flash slots. After a successful action,
//! or one that failed part way through writing, both the session user and the
//! ledger snapshot are re-read from the store.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use koperasi_data::{Transaction, User};
use mockable::Clock;
use thiserror::Error;
use tracing::debug;

use super::aggregation::MemberOverview;
use super::flash::FlashMessage;
use super::member_actions::{ActionOutcome, MemberActionError, MemberActions};
use super::ports::KeyValueStore;
use super::record_store::RecordStore;
use super::session::{Session, View};

/// Shown when a typed amount is rejected.
pub const INVALID_AMOUNT_MESSAGE: &str = "Masukkan jumlah yang valid";
/// Shown when the store rejects a write.
pub const STORAGE_FAILED_MESSAGE: &str = "Gagal menyimpan data, silakan coba lagi";

/// Reasons a member dashboard cannot be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The session is signed out or belongs to an administrator.
    #[error("member dashboard requires a signed-in member, session shows {0:?}")]
    NotMember(View),
}

/// Dashboard of one signed-in member.
pub struct MemberDashboard<S> {
    records: Rc<RecordStore<S>>,
    actions: MemberActions<S>,
    session: Session,
    member: User,
    flash: FlashMessage,
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> MemberDashboard<S> {
    /// Open the dashboard for a member session.
    ///
    /// # Examples
    /// ```
    /// use std::rc::Rc;
    /// use std::sync::Arc;
    ///
    /// use koperasi::domain::{
    ///     DEFAULT_FLASH_TTL, LoginCredentials, MemberDashboard, RecordStore, Session,
    /// };
    /// use koperasi::outbound::memory::InMemoryKeyValueStore;
    /// use koperasi_data::Rupiah;
    /// use mockable::DefaultClock;
    ///
    /// let records = Rc::new(RecordStore::new(InMemoryKeyValueStore::new()));
    /// records.initialize().unwrap();
    /// let mut session = Session::new();
    /// let creds = LoginCredentials::try_from_parts("john", "member123").unwrap();
    /// session.login(&records, &creds).unwrap();
    ///
    /// let mut dashboard =
    ///     MemberDashboard::mount(records, Arc::new(DefaultClock), DEFAULT_FLASH_TTL, session)
    ///         .unwrap();
    /// dashboard.deposit("1000000").unwrap();
    /// assert_eq!(dashboard.overview().savings(), Rupiah::new(6_000_000));
    /// ```
    pub fn mount(
        records: Rc<RecordStore<S>>,
        clock: Arc<dyn Clock>,
        flash_ttl: Duration,
        session: Session,
    ) -> Result<Self, DashboardError> {
        let member = match (session.view(), session.current_user()) {
            (View::MemberDashboard, Some(user)) => user.clone(),
            (other, _) => return Err(DashboardError::NotMember(other)),
        };
        let transactions = records.transactions();
        Ok(Self {
            actions: MemberActions::new(Rc::clone(&records), Arc::clone(&clock)),
            flash: FlashMessage::new(clock, flash_ttl),
            records,
            session,
            member,
            transactions,
        })
    }

    /// Add savings for the signed-in member.
    pub fn deposit(&mut self, raw_amount: &str) -> Result<ActionOutcome, MemberActionError> {
        self.run(raw_amount, |actions, user, raw| actions.deposit(user, raw))
    }

    /// Request a loan for the signed-in member.
    pub fn request_loan(&mut self, raw_amount: &str) -> Result<ActionOutcome, MemberActionError> {
        self.run(raw_amount, |actions, user, raw| actions.request_loan(user, raw))
    }

    fn run(
        &mut self,
        raw_amount: &str,
        action: impl FnOnce(&MemberActions<S>, &User, &str) -> Result<ActionOutcome, MemberActionError>,
    ) -> Result<ActionOutcome, MemberActionError> {
        self.flash.clear_error();
        match action(&self.actions, &self.member, raw_amount) {
            Ok(outcome) => {
                self.flash.show(outcome.message.clone());
                self.refresh();
                Ok(outcome)
            }
            Err(error) => {
                debug!(user_id = self.member.id, %error, "member action rejected");
                let message = match &error {
                    MemberActionError::InvalidAmount(_) => INVALID_AMOUNT_MESSAGE,
                    MemberActionError::Store(_) => {
                        // An earlier write of the action may have landed.
                        self.refresh();
                        STORAGE_FAILED_MESSAGE
                    }
                };
                self.flash.fail(message);
                Err(error)
            }
        }
    }

    /// Re-read the session user and the ledger snapshot from the store.
    fn refresh(&mut self) {
        self.session.reload(&self.records);
        if let Some(user) = self.session.current_user() {
            self.member = user.clone();
        }
        self.transactions = self.records.transactions();
    }

    /// Balances and own history as currently displayed.
    pub fn overview(&self) -> MemberOverview {
        MemberOverview::for_user(&self.member, &self.transactions)
    }

    /// Success and error slots.
    pub const fn flash(&self) -> &FlashMessage {
        &self.flash
    }

    /// The session driving this dashboard.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Sign out, dropping any pending message, and hand back the session.
    pub fn logout(mut self) -> Session {
        self.flash.cancel();
        self.session.logout();
        self.session
    }
}
