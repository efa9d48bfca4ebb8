//! Deposit and loan request use-cases.
//!
//! Both actions follow the same flow: validate the typed amount, append a new
//! transaction, then persist the user with the matching balance increased.
//! Invalid input never touches the store.

use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use koperasi_data::{Rupiah, Transaction, TransactionKind, TransactionStatus, User};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use super::amount::{InvalidAmount, parse_amount};
use super::ports::KeyValueStore;
use super::record_store::{RecordStore, RecordStoreError};

/// Failures of a member action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberActionError {
    /// The typed amount was rejected; nothing was written.
    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),
    /// Persisting the action failed.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The appended transaction.
    pub transaction: Transaction,
    /// The user as persisted after the balance change.
    pub user: User,
    /// Confirmation shown to the member.
    pub message: String,
}

/// Member-facing mutations over an injected record store and clock.
pub struct MemberActions<S> {
    records: Rc<RecordStore<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> MemberActions<S> {
    /// Create the use-case service.
    ///
    /// # Examples
    /// ```
    /// use std::rc::Rc;
    /// use std::sync::Arc;
    ///
    /// use koperasi::domain::{MemberActions, RecordStore};
    /// use koperasi::outbound::memory::InMemoryKeyValueStore;
    /// use koperasi_data::Rupiah;
    /// use mockable::DefaultClock;
    ///
    /// let records = Rc::new(RecordStore::new(InMemoryKeyValueStore::new()));
    /// records.initialize().unwrap();
    /// let actions = MemberActions::new(Rc::clone(&records), Arc::new(DefaultClock));
    ///
    /// let john = records.find_user(2).unwrap();
    /// let outcome = actions.deposit(&john, "1000000").unwrap();
    /// assert_eq!(outcome.user.savings, Rupiah::new(6_000_000));
    /// ```
    pub fn new(records: Rc<RecordStore<S>>, clock: Arc<dyn Clock>) -> Self {
        Self { records, clock }
    }

    /// Pay `raw_amount` into the user's savings.
    pub fn deposit(&self, user: &User, raw_amount: &str) -> Result<ActionOutcome, MemberActionError> {
        self.apply(user, raw_amount, TransactionKind::Deposit)
    }

    /// Borrow `raw_amount`, increasing the user's outstanding loans.
    pub fn request_loan(
        &self,
        user: &User,
        raw_amount: &str,
    ) -> Result<ActionOutcome, MemberActionError> {
        self.apply(user, raw_amount, TransactionKind::Loan)
    }

    fn apply(
        &self,
        user: &User,
        raw_amount: &str,
        kind: TransactionKind,
    ) -> Result<ActionOutcome, MemberActionError> {
        let amount = parse_amount(raw_amount)?;
        let now = self.clock.utc();
        let transaction = Transaction {
            id: next_transaction_id(&self.records.transactions(), now),
            user_id: user.id,
            kind,
            amount,
            date: now.date_naive(),
            status: TransactionStatus::initial_for(kind),
        };
        self.records.add_transaction(transaction.clone())?;

        // Build on the stored record so an out-of-date session copy cannot
        // undo an earlier balance change.
        let mut updated = self
            .records
            .find_user(user.id)
            .unwrap_or_else(|| user.clone());
        match kind {
            TransactionKind::Deposit => updated.savings = updated.savings + amount,
            TransactionKind::Loan => updated.loans = updated.loans + amount,
        }
        if !self.records.update_user(&updated)? {
            warn!(user_id = user.id, "balance change for user missing from store");
        }
        info!(
            user_id = user.id,
            transaction_id = transaction.id,
            kind = kind.label(),
            amount = amount.get(),
            "member action recorded"
        );

        Ok(ActionOutcome {
            message: success_message(kind, amount),
            transaction,
            user: updated,
        })
    }
}

/// Millisecond timestamp of `now`, bumped past every stored id.
fn next_transaction_id(existing: &[Transaction], now: DateTime<Utc>) -> u64 {
    let from_clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let after_last = existing
        .iter()
        .map(|tx| tx.id)
        .max()
        .map_or(0, |max| max.saturating_add(1));
    from_clock.max(after_last)
}

fn success_message(kind: TransactionKind, amount: Rupiah) -> String {
    match kind {
        TransactionKind::Deposit => {
            format!("Simpanan sebesar {} berhasil ditambahkan", amount.to_idr())
        }
        TransactionKind::Loan => {
            format!("Pengajuan pinjaman sebesar {} berhasil", amount.to_idr())
        }
    }
}
