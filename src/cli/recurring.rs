//! Recurring transaction CLI commands

use chrono::Utc;
use clap::Subcommand;

use super::parse_datetime;
use crate::config::settings::Settings;
use crate::display::recurring::format_recurring_list;
use crate::error::{TallyError, TallyResult};
use crate::models::Frequency;
use crate::services::{CreateRecurringInput, RecurringService};
use crate::storage::Storage;

/// Recurring subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Create a recurring transaction
    Add {
        /// Account name
        account: String,
        /// Amount expression
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Frequency (daily, weekly, monthly, yearly)
        #[arg(short, long, default_value = "monthly")]
        every: String,
        /// Repeat every N periods
        #[arg(short, long, default_value = "1")]
        interval: u32,
        /// First occurrence, defaults to now
        #[arg(short, long)]
        start: Option<String>,
        /// Last possible occurrence
        #[arg(long)]
        end: Option<String>,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Generate transactions held as pending
        #[arg(long)]
        hold: bool,
    },
    /// List recurring transactions
    List,
    /// Stop a recurring transaction
    Deactivate {
        /// Recurring transaction ID
        id: String,
    },
    /// Generate all due transactions now
    Sync,
}

/// Handle a recurring command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> TallyResult<()> {
    let service = RecurringService::new(storage);

    match cmd {
        RecurringCommands::Add {
            account,
            amount,
            every,
            interval,
            start,
            end,
            description,
            hold,
        } => {
            let frequency: Frequency = every.parse().map_err(TallyError::Validation)?;
            let start_date = match start {
                Some(s) => parse_datetime(&s)?,
                None => Utc::now(),
            };
            let end_date = end.as_deref().map(parse_datetime).transpose()?;

            let template = service.create(CreateRecurringInput {
                account,
                amount,
                frequency,
                interval,
                start_date,
                end_date,
                description,
                hold_as_pending: hold,
            })?;

            println!("Created recurring transaction: {}", template.id);
            println!("  {}", template);
            println!("Run 'tally recurring sync' to generate due transactions.");
        }

        RecurringCommands::List => {
            print!("{}", format_recurring_list(&service.list()?, settings));
        }

        RecurringCommands::Deactivate { id } => {
            let template = service.deactivate(&id)?;
            println!("Deactivated recurring transaction: {}", template.id);
        }

        RecurringCommands::Sync => {
            let report = service.synchronize_all(Utc::now())?;
            println!(
                "Checked {} recurring transaction(s), created {} transaction(s)",
                report.templates_checked, report.transactions_created
            );
        }
    }

    Ok(())
}
