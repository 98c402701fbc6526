//! Transaction display formatting
//!
//! Renders the confirmed/pending register, the trash and single-transaction
//! detail views. Status labels come from `PendingState`, so they always match
//! what confirm/hold will accept.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Transaction;
use crate::pending::{classify, is_holdable_now, PendingSplit};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct TrashRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Deleted")]
    deleted: String,
}

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a timestamp in local time with the configured pattern
///
/// An unusable pattern falls back to `%Y-%m-%d %H:%M`.
pub fn format_date(date: DateTime<Utc>, settings: &Settings) -> String {
    let local = date.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(&settings.date_format)).is_err() {
        return local.format(FALLBACK_DATE_FORMAT).to_string();
    }
    out
}

fn status_label(txn: &Transaction, now: DateTime<Utc>) -> String {
    let state = classify(txn, now);
    let mut label = state.to_string();
    if is_holdable_now(txn, now) {
        label.push_str(" (held)");
    }
    if txn.recurring_id.is_some() {
        label.push_str(" (recurring)");
    }
    label
}

fn transaction_row(txn: &Transaction, now: DateTime<Utc>, settings: &Settings) -> TransactionRow {
    TransactionRow {
        id: txn.id.to_string(),
        date: format_date(txn.transaction_date, settings),
        account: txn.account.clone(),
        description: truncate(&txn.description, 32),
        amount: txn.amount.format_with_symbol(&settings.currency_symbol),
        status: status_label(txn, now),
    }
}

/// Format transactions as a table
pub fn format_transaction_table(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    settings: &Settings,
) -> String {
    let rows: Vec<_> = transactions
        .iter()
        .map(|t| transaction_row(t, now, settings))
        .collect();
    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

/// Format the pending section followed by the confirmed register
pub fn format_transaction_split(
    split: &PendingSplit<Transaction>,
    now: DateTime<Utc>,
    settings: &Settings,
) -> String {
    if split.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();

    if !split.pending.is_empty() {
        output.push_str(&format!("Pending ({})\n", split.pending.len()));
        output.push_str(&format_transaction_table(&split.pending, now, settings));
        output.push('\n');
    }

    output.push_str(&format!("Confirmed ({})\n", split.confirmed.len()));
    if split.confirmed.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&format_transaction_table(&split.confirmed, now, settings));
    }

    output
}

/// Format trashed transactions
pub fn format_trash(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "Trash is empty.\n".to_string();
    }

    let rows: Vec<_> = transactions
        .iter()
        .map(|t| TrashRow {
            id: t.id.to_string(),
            date: format_date(t.transaction_date, settings),
            account: t.account.clone(),
            description: truncate(&t.description, 32),
            amount: t.amount.format_with_symbol(&settings.currency_symbol),
            deleted: t
                .deleted_at
                .map(|at| format_date(at, settings))
                .unwrap_or_default(),
        })
        .collect();

    let mut output = format!("Trash ({})\n", transactions.len());
    output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    now: DateTime<Utc>,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Account:     {}\n", txn.account));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(txn.transaction_date, settings)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if !txn.memo.is_empty() {
        output.push_str(&format!("Memo:        {}\n", txn.memo));
    }

    output.push_str(&format!("Status:      {}\n", status_label(txn, now)));

    if let Some(at) = txn.deleted_at {
        output.push_str(&format!("Deleted:     {}\n", format_date(at, settings)));
    }
    if let Some(rec) = txn.recurring_id {
        output.push_str(&format!("Recurring:   {}\n", rec));
    }

    output
}

/// Truncate a string to `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
