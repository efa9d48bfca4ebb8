//! Domain services and read models for the cooperative.
//!
//! Purpose: keep the savings-and-loan rules independent of where records are
//! stored and how they are shown. Persistence is reached only through
//! [`ports::KeyValueStore`]; time only through `mockable::Clock`.
//!
//! Public surface:
//! - RecordStore (alias to `record_store::RecordStore`): the two persisted
//!   collections and their seeding.
//! - authenticate / LoginCredentials: plaintext login against stored users.
//! - AdminOverview / MemberOverview: dashboard figures derived on demand.
//! - MemberActions: deposit and loan request use-cases.
//! - Session / FlashMessage / MemberDashboard: per-page view state.

pub mod aggregation;
pub mod amount;
pub mod auth;
pub mod dashboard;
pub mod flash;
pub mod member_actions;
pub mod ports;
pub mod record_store;
pub mod session;

pub use self::aggregation::{
    AdminOverview, LedgerEntry, MemberOverview, member_count, members, total_loans,
    total_savings, transactions_for,
};
pub use self::amount::{InvalidAmount, parse_amount};
pub use self::auth::{AuthError, LoginCredentials, authenticate};
pub use self::dashboard::{DashboardError, MemberDashboard};
pub use self::flash::{DEFAULT_FLASH_TTL, FlashMessage};
pub use self::member_actions::{ActionOutcome, MemberActionError, MemberActions};
pub use self::record_store::{RecordStore, RecordStoreError, TRANSACTIONS_KEY, USERS_KEY};
pub use self::session::{Session, View};
