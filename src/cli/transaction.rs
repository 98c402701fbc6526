//! Transaction CLI commands
//!
//! Implements CLI commands for transaction entry and the pending/trash
//! lifecycle.

use chrono::Utc;
use clap::Subcommand;

use super::parse_datetime;
use crate::config::settings::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_split, format_trash,
};
use crate::error::TallyResult;
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Account name
        account: String,
        /// Amount expression (e.g., "-12.50", "3*4.99", "-40+12.5")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD or YYYY-MM-DD HH:MM), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
        /// Hold until explicitly confirmed
        #[arg(short, long)]
        pending: bool,
    },
    /// List transactions, pending first
    List {
        /// Only show this account
        #[arg(short, long)]
        account: Option<String>,
        /// Also show the trash
        #[arg(long)]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Confirm a held transaction
    Confirm {
        /// Transaction ID
        id: String,
    },
    /// Hold a transaction as pending
    Hold {
        /// Transaction ID
        id: String,
    },
    /// Move a transaction to the trash
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Restore a transaction from the trash
    Restore {
        /// Transaction ID
        id: String,
    },
    /// List the trash
    Trash,
    /// Permanently remove old trash
    Purge {
        /// Override the configured retention period
        #[arg(long)]
        days: Option<u32>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);
    let now = Utc::now();

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            description,
            date,
            memo,
            pending,
        } => {
            let transaction_date = date.as_deref().map(parse_datetime).transpose()?;

            let txn = service.create(CreateTransactionInput {
                account,
                amount,
                transaction_date,
                description,
                memo,
                pending,
            })?;

            println!("Created transaction: {}", txn.id);
            print!("{}", format_transaction_details(&txn, now, settings));
        }

        TransactionCommands::List { account, all } => {
            let mut split = service.list(now)?;
            if let Some(account) = &account {
                split.confirmed.retain(|t| &t.account == account);
                split.pending.retain(|t| &t.account == account);
            }
            print!("{}", format_transaction_split(&split, now, settings));

            if all {
                let mut trash = service.trash()?;
                if let Some(account) = &account {
                    trash.retain(|t| &t.account == account);
                }
                println!();
                print!("{}", format_trash(&trash, settings));
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!("{}", format_transaction_details(&txn, now, settings));
        }

        TransactionCommands::Confirm { id } => {
            let txn = service.confirm(&id, now)?;
            println!("Confirmed transaction: {} {}", txn.id, txn.amount);
        }

        TransactionCommands::Hold { id } => {
            let txn = service.hold(&id)?;
            println!("Holding transaction as pending: {} {}", txn.id, txn.amount);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id, now)?;
            println!("Moved to trash: {}", txn.id);
        }

        TransactionCommands::Restore { id } => {
            let txn = service.restore(&id)?;
            println!("Restored transaction: {}", txn.id);
        }

        TransactionCommands::Trash => {
            print!("{}", format_trash(&service.trash()?, settings));
        }

        TransactionCommands::Purge { days } => {
            let retention = days.unwrap_or(settings.trash_retention_days);
            let purged = service.purge_trash(now, retention)?;
            println!(
                "Purged {} transaction(s) deleted more than {} day(s) ago",
                purged, retention
            );
        }
    }

    Ok(())
}
