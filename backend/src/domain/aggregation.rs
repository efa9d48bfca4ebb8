//! Figures and lists derived from record snapshots.
//!
//! Every function here is pure and total. Dashboards call them again on each
//! render; nothing is cached between calls.

use std::collections::HashMap;

use koperasi_data::{Rupiah, Transaction, User};

/// Users with the member role, in stored order.
pub fn members(users: &[User]) -> Vec<User> {
    users.iter().filter(|user| user.is_member()).cloned().collect()
}

/// Number of members among `users`.
pub fn member_count(users: &[User]) -> usize {
    users.iter().filter(|user| user.is_member()).count()
}

/// Sum of savings balances.
pub fn total_savings(members: &[User]) -> Rupiah {
    members.iter().map(|member| member.savings).sum()
}

/// Sum of outstanding loan balances.
pub fn total_loans(members: &[User]) -> Rupiah {
    members.iter().map(|member| member.loans).sum()
}

/// Transactions owned by `user_id`, in insertion order.
pub fn transactions_for(transactions: &[Transaction], user_id: u64) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.user_id == user_id)
        .cloned()
        .collect()
}

/// One ledger line on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// The recorded transaction.
    pub transaction: Transaction,
    /// Display name of the owning user, `None` when the id matches nobody.
    pub owner_name: Option<String>,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOverview {
    /// Number of members.
    pub member_count: usize,
    /// Savings held across all members.
    pub total_savings: Rupiah,
    /// Loans outstanding across all members.
    pub total_loans: Rupiah,
    /// Member accounts in stored order.
    pub members: Vec<User>,
    /// Full ledger in insertion order.
    pub ledger: Vec<LedgerEntry>,
}

impl AdminOverview {
    /// Derive the overview from a snapshot of both collections.
    ///
    /// # Examples
    /// ```
    /// use koperasi::domain::AdminOverview;
    /// use koperasi_data::{Rupiah, seed_transactions, seed_users};
    ///
    /// let overview = AdminOverview::from_snapshot(&seed_users(), &seed_transactions());
    /// assert_eq!(overview.member_count, 3);
    /// assert_eq!(overview.total_savings, Rupiah::new(16_500_000));
    /// assert_eq!(overview.total_loans, Rupiah::new(7_000_000));
    /// ```
    pub fn from_snapshot(users: &[User], transactions: &[Transaction]) -> Self {
        let members = members(users);
        // First match wins, like a front-to-back scan.
        let mut names: HashMap<u64, &str> = HashMap::new();
        for user in users {
            names.entry(user.id).or_insert(user.name.as_str());
        }
        let ledger = transactions
            .iter()
            .map(|tx| LedgerEntry {
                transaction: tx.clone(),
                owner_name: names.get(&tx.user_id).map(|name| (*name).to_owned()),
            })
            .collect();

        Self {
            member_count: members.len(),
            total_savings: total_savings(&members),
            total_loans: total_loans(&members),
            members,
            ledger,
        }
    }
}

/// Everything the member dashboard shows for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOverview {
    /// The member as last read.
    pub user: User,
    /// The member's own transactions in insertion order.
    pub history: Vec<Transaction>,
}

impl MemberOverview {
    /// Derive the overview for `user` from a ledger snapshot.
    pub fn for_user(user: &User, transactions: &[Transaction]) -> Self {
        Self {
            user: user.clone(),
            history: transactions_for(transactions, user.id),
        }
    }

    /// Savings balance shown on the dashboard.
    pub const fn savings(&self) -> Rupiah {
        self.user.savings
    }

    /// Loan balance shown on the dashboard.
    pub const fn loans(&self) -> Rupiah {
        self.user.loans
    }
}
