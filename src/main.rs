use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use tally::cli::{
    handle_balance_command, handle_calc_command, handle_history_command,
    handle_recurring_command, handle_transaction_command, handle_watch_command, RecurringCommands,
    TransactionCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::services::{AppState, ForegroundSync, RecurringService, SyncOutcome};
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Ledger with pending transactions and calculator-style amount entry",
    long_about = "Tally records transactions whose amounts can be typed as arithmetic \
                  (\"12.50+3*2\"), holds future or uncertain transactions as pending \
                  until they are confirmed, and generates recurring transactions."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an amount expression
    Calc {
        /// Expression such as "12.50+3*2"
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Round to cents like transaction entry does
        #[arg(long)]
        money: bool,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Recurring transaction commands
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Show account balances
    Balance {
        /// Only show this account
        account: Option<String>,
    },

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Sync recurring transactions from app state changes read on stdin
    ///
    /// Each line is `active`, `background` or `inactive`. Syncs wait for the
    /// configured debounce delay.
    Watch,

    /// Show current configuration and paths
    Config,
}

/// Generate due recurring transactions as a foreground transition would
///
/// A one-shot command has nothing to coalesce, so the hook fires immediately.
/// Failures are logged by the hook and never block the command.
fn sync_on_launch(storage: &Storage) {
    let mut hook = ForegroundSync::new(RecurringService::new(storage), Duration::ZERO);
    let now = Instant::now();
    hook.on_app_state_change(AppState::Active, now);
    match hook.poll(now) {
        Some(SyncOutcome::Completed(report)) => debug!(
            "Launch sync created {} transaction(s)",
            report.transactions_created
        ),
        Some(SyncOutcome::Failed(reason)) => debug!("Launch sync skipped: {}", reason),
        Some(SyncOutcome::Discarded) => debug!("Launch sync discarded"),
        None => debug!("Launch sync did not fire"),
    }
    hook.teardown();
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if matches!(
        cli.command,
        Some(Commands::Txn(_)) | Some(Commands::Balance { .. })
    ) {
        sync_on_launch(&storage);
    }

    match cli.command {
        Some(Commands::Calc { expression, money }) => {
            handle_calc_command(&expression, money)?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Recurring(cmd)) => {
            handle_recurring_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Balance { account }) => {
            handle_balance_command(&storage, &settings, account.as_deref())?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Watch) => {
            handle_watch_command(&storage, &settings)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Tally Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", storage.audit().path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Sync debounce:        {} ms", settings.sync_debounce_ms);
            println!("  Trash retention:      {} days", settings.trash_retention_days);
        }
        None => {
            println!("Tally - transactions, pending holds and recurring entries");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
