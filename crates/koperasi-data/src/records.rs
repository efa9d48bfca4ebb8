//! Stored record types.
//!
//! Users and transactions are kept as flat records. The serde attributes pin
//! the field names of the persisted lists so data written by earlier
//! deployments keeps decoding.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An amount of money in whole rupiah.
///
/// Arithmetic saturates at `u64::MAX` rather than wrapping.
///
/// # Example
///
/// ```
/// use koperasi_data::Rupiah;
///
/// let total = Rupiah::new(5_000_000) + Rupiah::new(1_000_000);
/// assert_eq!(total, Rupiah::new(6_000_000));
/// assert!(Rupiah::ZERO.is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(u64);

impl Rupiah {
    /// No money at all.
    pub const ZERO: Self = Self(0);

    /// Wraps a whole-rupiah value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw number of rupiah.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` for a zero amount.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Formats the amount in Indonesian currency notation.
    ///
    /// ```
    /// use koperasi_data::Rupiah;
    ///
    /// assert_eq!(Rupiah::new(5_000_000).to_idr(), "Rp 5.000.000");
    /// assert_eq!(Rupiah::new(750).to_idr(), "Rp 750");
    /// ```
    #[must_use]
    pub fn to_idr(self) -> String {
        let reversed: Vec<char> = self.0.to_string().chars().rev().collect();
        let mut groups: Vec<String> = reversed
            .chunks(3)
            .map(|chunk| chunk.iter().rev().collect())
            .collect();
        groups.reverse();
        format!("Rp {}", groups.join("."))
    }
}

impl Add for Rupiah {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Rupiah {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Cooperative administrator; sees every member.
    Admin,
    /// Cooperative member; manages only their own balances.
    Member,
}

/// A cooperative account.
///
/// Balances are always present. Stored records written without them decode
/// with zero balances, which is how admin accounts are persisted.
///
/// # Example
///
/// ```
/// use koperasi_data::{Role, Rupiah, User};
///
/// let user = User::new(7, "siti", "rahasia", Role::Member, "Siti", "siti@email.com")
///     .with_balances(Rupiah::new(250_000), Rupiah::ZERO);
///
/// assert_eq!(user.savings, Rupiah::new(250_000));
/// assert!(user.is_member());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric identifier.
    pub id: u64,
    /// Unique login name.
    pub username: String,
    /// Plaintext credential, compared verbatim at login.
    pub password: String,
    /// Access level.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Savings balance (simpanan).
    #[serde(rename = "simpanan", default)]
    pub savings: Rupiah,
    /// Outstanding loan balance (pinjaman).
    #[serde(rename = "pinjaman", default)]
    pub loans: Rupiah,
}

impl User {
    /// Builds a user with zero balances.
    #[must_use]
    pub fn new(
        id: u64,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            role,
            name: name.into(),
            email: email.into(),
            savings: Rupiah::ZERO,
            loans: Rupiah::ZERO,
        }
    }

    /// Replaces both balances.
    #[must_use]
    pub const fn with_balances(mut self, savings: Rupiah, loans: Rupiah) -> Self {
        self.savings = savings;
        self.loans = loans;
        self
    }

    /// Returns `true` when the account belongs to a cooperative member.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.role == Role::Member
    }
}

/// What a transaction did to a member's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money paid into savings (simpanan).
    #[serde(rename = "simpanan", alias = "deposit")]
    Deposit,
    /// Money borrowed from the cooperative (pinjaman).
    #[serde(rename = "pinjaman", alias = "loan")]
    Loan,
}

impl TransactionKind {
    /// Human readable label used by the dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deposit => "simpanan",
            Self::Loan => "pinjaman",
        }
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Settled; used for deposits.
    Completed,
    /// Still running; used for loans until repaid.
    Active,
}

impl TransactionStatus {
    /// Status a freshly created transaction of `kind` starts in.
    #[must_use]
    pub const fn initial_for(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Completed,
            TransactionKind::Loan => Self::Active,
        }
    }

    /// Human readable label used by the dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Selesai",
            Self::Active => "Aktif",
        }
    }
}

/// A single deposit or loan entry in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique numeric identifier.
    pub id: u64,
    /// Identifier of the owning user.
    pub user_id: u64,
    /// Deposit or loan.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Strictly positive amount.
    pub amount: Rupiah,
    /// Calendar date the transaction was recorded on.
    pub date: NaiveDate,
    /// Lifecycle state.
    pub status: TransactionStatus,
}
