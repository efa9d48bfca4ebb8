//! Command-line front end for the cooperative.
//!
//! Each invocation is one page visit: the store is initialised, the user
//! signs in, an optional action runs and the resulting dashboard is rendered.

pub mod render;

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::KeyValueStore;
use crate::domain::{
    ActionOutcome, AdminOverview, AuthError, DashboardError, LoginCredentials, MemberActionError,
    MemberDashboard, RecordStore, RecordStoreError, Session, View,
};

/// Shown whenever a sign-in attempt is rejected.
pub const LOGIN_FAILED_MESSAGE: &str = "Username atau password salah!";

/// `koperasi` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "koperasi",
    about = "Savings and loan records for a small cooperative",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Seed the store if it is empty.
    Init,
    /// Sign in and show the dashboard for the user's role.
    Dashboard(LoginArgs),
    /// Sign in as a member and add savings.
    Deposit(ActionArgs),
    /// Sign in as a member and request a loan.
    Loan(ActionArgs),
}

/// Sign-in flags shared by every dashboard command.
#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Account username.
    #[arg(long, value_name = "username")]
    pub username: String,
    /// Account password.
    #[arg(long, value_name = "password")]
    pub password: String,
}

/// Flags for a member action.
#[derive(Debug, Clone, Args)]
pub struct ActionArgs {
    #[command(flatten)]
    /// Sign-in flags.
    pub login: LoginArgs,
    /// Amount in whole rupiah, as typed.
    #[arg(long, value_name = "rupiah", allow_hyphen_values = true)]
    pub amount: String,
}

/// Failures surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Sign-in was rejected.
    #[error("Username atau password salah!")]
    Login(#[source] AuthError),
    /// No user is signed in, so there is no dashboard to show.
    #[error("Silakan login terlebih dahulu")]
    SignedOut,
    /// Only members may run deposits and loan requests.
    #[error("Hanya anggota yang dapat melakukan transaksi")]
    NotMember(#[source] DashboardError),
    /// The action was rejected; `message` is what the member is shown.
    #[error("{message}")]
    Action {
        /// Member-facing explanation.
        message: String,
        /// Underlying failure.
        #[source]
        source: MemberActionError,
    },
    /// Seeding the store failed.
    #[error("failed to initialise store: {0}")]
    Store(#[from] RecordStoreError),
}

/// Shared dependencies of every command.
pub struct CliContext<S> {
    /// Record store backing the run.
    pub records: Rc<RecordStore<S>>,
    /// Time source for transaction stamps and flash expiry.
    pub clock: Arc<dyn Clock>,
    /// Flash message lifetime.
    pub flash_ttl: Duration,
}

/// Execute `command` and return the text to print.
///
/// # Examples
/// ```
/// use std::rc::Rc;
/// use std::sync::Arc;
///
/// use koperasi::domain::{DEFAULT_FLASH_TTL, RecordStore};
/// use koperasi::inbound::cli::{CliContext, Command, LoginArgs, run};
/// use koperasi::outbound::memory::InMemoryKeyValueStore;
/// use mockable::DefaultClock;
///
/// let ctx = CliContext {
///     records: Rc::new(RecordStore::new(InMemoryKeyValueStore::new())),
///     clock: Arc::new(DefaultClock),
///     flash_ttl: DEFAULT_FLASH_TTL,
/// };
/// let login = LoginArgs { username: "admin".into(), password: "admin123".into() };
/// let text = run(&Command::Dashboard(login), &ctx).unwrap();
/// assert!(text.contains("Total Anggota: 3"));
/// ```
pub fn run<S: KeyValueStore>(command: &Command, ctx: &CliContext<S>) -> Result<String, CliError> {
    ctx.records.initialize()?;
    match command {
        Command::Init => {
            let users = ctx.records.users().len();
            let transactions = ctx.records.transactions().len();
            info!(users, transactions, "store ready");
            Ok(format!(
                "Data koperasi siap: {users} pengguna, {transactions} transaksi\n"
            ))
        }
        Command::Dashboard(login) => dashboard_for(ctx, sign_in(ctx, login)?),
        Command::Deposit(args) => member_action(ctx, args, MemberDashboard::deposit),
        Command::Loan(args) => member_action(ctx, args, MemberDashboard::request_loan),
    }
}

fn sign_in<S: KeyValueStore>(ctx: &CliContext<S>, login: &LoginArgs) -> Result<Session, CliError> {
    let credentials =
        LoginCredentials::try_from_parts(&login.username, &login.password).map_err(CliError::Login)?;
    let mut session = Session::new();
    session
        .login(&ctx.records, &credentials)
        .map_err(CliError::Login)?;
    Ok(session)
}

fn dashboard_for<S: KeyValueStore>(
    ctx: &CliContext<S>,
    session: Session,
) -> Result<String, CliError> {
    match session.view() {
        View::MemberDashboard => {
            let dashboard = mount(ctx, session)?;
            Ok(render::member_dashboard(&dashboard.overview(), dashboard.flash()))
        }
        View::AdminDashboard => {
            let overview =
                AdminOverview::from_snapshot(&ctx.records.users(), &ctx.records.transactions());
            Ok(render::admin_dashboard(&overview))
        }
        View::Login => Err(CliError::SignedOut),
    }
}

fn mount<S: KeyValueStore>(
    ctx: &CliContext<S>,
    session: Session,
) -> Result<MemberDashboard<S>, CliError> {
    MemberDashboard::mount(
        Rc::clone(&ctx.records),
        Arc::clone(&ctx.clock),
        ctx.flash_ttl,
        session,
    )
    .map_err(CliError::NotMember)
}

type Action<S> = fn(&mut MemberDashboard<S>, &str) -> Result<ActionOutcome, MemberActionError>;

fn member_action<S: KeyValueStore>(
    ctx: &CliContext<S>,
    args: &ActionArgs,
    action: Action<S>,
) -> Result<String, CliError> {
    let session = sign_in(ctx, &args.login)?;
    let mut dashboard = mount(ctx, session)?;
    if let Err(source) = action(&mut dashboard, &args.amount) {
        let message = dashboard
            .flash()
            .error()
            .map_or_else(|| source.to_string(), str::to_owned);
        return Err(CliError::Action { message, source });
    }
    Ok(render::member_dashboard(&dashboard.overview(), dashboard.flash()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{TimeZone, Utc};
    use clap::CommandFactory;
    use koperasi_data::{Rupiah, seed_transactions};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::DEFAULT_FLASH_TTL;
    use crate::domain::dashboard::INVALID_AMOUNT_MESSAGE;
    use crate::outbound::memory::InMemoryKeyValueStore;
    use crate::test_support::FixedClock;

    #[fixture]
    fn ctx() -> CliContext<InMemoryKeyValueStore> {
        let now = Utc
            .with_ymd_and_hms(2024, 4, 2, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        CliContext {
            records: Rc::new(RecordStore::new(InMemoryKeyValueStore::new())),
            clock: Arc::new(FixedClock::new(now)),
            flash_ttl: DEFAULT_FLASH_TTL,
        }
    }

    fn login(username: &str, password: &str) -> LoginArgs {
        LoginArgs {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    fn action(username: &str, amount: &str) -> ActionArgs {
        ActionArgs {
            login: login(username, "member123"),
            amount: amount.to_owned(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_amount_parses_as_value() {
        let cli = Cli::try_parse_from([
            "koperasi", "deposit", "--username", "john", "--password", "member123", "--amount",
            "-5",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Command::Deposit(ref args) if args.amount == "-5"));
    }

    #[rstest]
    fn init_seeds_store(ctx: CliContext<InMemoryKeyValueStore>) {
        let text = run(&Command::Init, &ctx).expect("init");
        assert_eq!(text, "Data koperasi siap: 4 pengguna, 5 transaksi\n");
        assert!(!ctx.records.backend().is_empty());
    }

    #[rstest]
    fn wrong_password_reports_login_failure(ctx: CliContext<InMemoryKeyValueStore>) {
        let err = run(&Command::Dashboard(login("john", "nope")), &ctx).expect_err("rejected");
        assert!(matches!(err, CliError::Login(AuthError::InvalidCredentials)));
        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
    }

    #[rstest]
    fn member_dashboard_renders_own_balances(ctx: CliContext<InMemoryKeyValueStore>) {
        let text = run(&Command::Dashboard(login("bob", "member123")), &ctx).expect("dashboard");
        assert!(text.contains("Simpanan Anda: Rp 3.500.000"));
        assert!(!text.contains("John Doe"));
    }

    #[rstest]
    fn deposit_prints_confirmation_and_new_balance(ctx: CliContext<InMemoryKeyValueStore>) {
        let text = run(&Command::Deposit(action("john", "1000000")), &ctx).expect("deposit");

        assert!(text.starts_with("Simpanan sebesar Rp 1.000.000 berhasil ditambahkan\n"));
        assert!(text.contains("Simpanan Anda: Rp 6.000.000"));
        assert_eq!(
            ctx.records.find_user(2).map(|user| user.savings),
            Some(Rupiah::new(6_000_000))
        );
    }

    #[rstest]
    fn invalid_amount_reports_member_message(ctx: CliContext<InMemoryKeyValueStore>) {
        let err = run(&Command::Loan(action("jane", "abc")), &ctx).expect_err("invalid");

        assert_eq!(err.to_string(), INVALID_AMOUNT_MESSAGE);
        assert_eq!(ctx.records.transactions(), seed_transactions());
    }

    #[rstest]
    fn signed_out_session_has_no_dashboard(ctx: CliContext<InMemoryKeyValueStore>) {
        let err = dashboard_for(&ctx, Session::new()).expect_err("signed out");

        assert!(matches!(err, CliError::SignedOut));
        assert_eq!(err.to_string(), "Silakan login terlebih dahulu");
    }

    #[rstest]
    fn admin_session_gets_admin_dashboard(ctx: CliContext<InMemoryKeyValueStore>) {
        let text = run(&Command::Dashboard(login("admin", "admin123")), &ctx).expect("dashboard");
        assert!(text.starts_with("Dashboard Admin\n"));
    }

    #[rstest]
    fn admin_cannot_deposit(ctx: CliContext<InMemoryKeyValueStore>) {
        let args = ActionArgs {
            login: login("admin", "admin123"),
            amount: "10".to_owned(),
        };
        let err = run(&Command::Deposit(args), &ctx).expect_err("admin");
        assert!(matches!(err, CliError::NotMember(_)));
    }
}
