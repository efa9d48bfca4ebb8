//! The fixed dataset a fresh store is seeded with.
//!
//! Both collections are rebuilt on every call so callers can mutate the
//! returned vectors freely.

use chrono::NaiveDate;

use crate::records::{Role, Rupiah, Transaction, TransactionKind, TransactionStatus, User};

/// Returns the seed user collection: one administrator and three members.
///
/// # Example
///
/// ```
/// use koperasi_data::seed_users;
///
/// let users = seed_users();
/// assert_eq!(users.len(), 4);
/// assert_eq!(users.first().map(|user| user.username.as_str()), Some("admin"));
/// ```
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(
            1,
            "admin",
            "admin123",
            Role::Admin,
            "Administrator",
            "admin@koperasi.com",
        ),
        User::new(2, "john", "member123", Role::Member, "John Doe", "john@email.com")
            .with_balances(Rupiah::new(5_000_000), Rupiah::new(2_000_000)),
        User::new(3, "jane", "member123", Role::Member, "Jane Smith", "jane@email.com")
            .with_balances(Rupiah::new(8_000_000), Rupiah::ZERO),
        User::new(4, "bob", "member123", Role::Member, "Bob Wilson", "bob@email.com")
            .with_balances(Rupiah::new(3_500_000), Rupiah::new(5_000_000)),
    ]
}

/// Returns the seed transaction ledger in insertion order.
#[must_use]
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        seed_transaction(1, 2, TransactionKind::Deposit, 1_000_000, (2024, 1, 15)),
        seed_transaction(2, 2, TransactionKind::Loan, 2_000_000, (2024, 1, 20)),
        seed_transaction(3, 3, TransactionKind::Deposit, 2_000_000, (2024, 2, 1)),
        seed_transaction(4, 4, TransactionKind::Deposit, 500_000, (2024, 2, 10)),
        seed_transaction(5, 4, TransactionKind::Loan, 5_000_000, (2024, 2, 15)),
    ]
}

fn seed_transaction(
    id: u64,
    user_id: u64,
    kind: TransactionKind,
    amount: u64,
    (year, month, day): (i32, u32, u32),
) -> Transaction {
    Transaction {
        id,
        user_id,
        kind,
        amount: Rupiah::new(amount),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        status: TransactionStatus::initial_for(kind),
    }
}
