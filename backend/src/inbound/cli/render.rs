//! Plain-text dashboards.
//!
//! Rendering only builds strings; writing them out is left to `main`.

use koperasi_data::Transaction;

use crate::domain::{AdminOverview, FlashMessage, MemberOverview};

const UNKNOWN_OWNER: &str = "-";

/// Render the administrator dashboard.
pub fn admin_dashboard(overview: &AdminOverview) -> String {
    let mut lines = vec![
        "Dashboard Admin".to_owned(),
        format!("Total Anggota: {}", overview.member_count),
        format!("Total Simpanan: {}", overview.total_savings.to_idr()),
        format!("Total Pinjaman: {}", overview.total_loans.to_idr()),
        String::new(),
        "Daftar Anggota".to_owned(),
    ];
    lines.extend(overview.members.iter().map(|member| {
        format!(
            "- {} <{}> simpanan {} pinjaman {}",
            member.name,
            member.email,
            member.savings.to_idr(),
            member.loans.to_idr()
        )
    }));

    lines.push(String::new());
    lines.push("Riwayat Transaksi".to_owned());
    lines.extend(overview.ledger.iter().map(|entry| {
        let owner = entry.owner_name.as_deref().unwrap_or(UNKNOWN_OWNER);
        format!("- {owner}: {}", transaction_line(&entry.transaction))
    }));
    join_lines(&lines)
}

/// Render the member dashboard, preceded by any visible flash message.
pub fn member_dashboard(overview: &MemberOverview, flash: &FlashMessage) -> String {
    let mut lines = Vec::new();
    if let Some(message) = flash.current() {
        lines.push(message.to_owned());
        lines.push(String::new());
    }
    lines.extend([
        "Dashboard Member".to_owned(),
        format!("Selamat datang, {}", overview.user.name),
        format!("Simpanan Anda: {}", overview.savings().to_idr()),
        format!("Pinjaman Anda: {}", overview.loans().to_idr()),
        String::new(),
        "Riwayat Transaksi".to_owned(),
    ]);

    if overview.history.is_empty() {
        lines.push("Belum ada transaksi".to_owned());
    }
    lines.extend(
        overview
            .history
            .iter()
            .map(|tx| format!("- {}", transaction_line(tx))),
    );
    join_lines(&lines)
}

/// Joins lines with a trailing newline after the last one.
fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn transaction_line(tx: &Transaction) -> String {
    format!(
        "{} {} {} {}",
        tx.date.format("%Y-%m-%d"),
        tx.kind.label(),
        tx.amount.to_idr(),
        tx.status.label()
    )
}
