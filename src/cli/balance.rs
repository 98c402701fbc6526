//! Balance and history CLI commands

use chrono::Utc;

use crate::config::settings::Settings;
use crate::display::balance::format_balance_summary;
use crate::error::TallyResult;
use crate::services::BalanceService;
use crate::storage::Storage;

/// Handle the balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    account: Option<&str>,
) -> TallyResult<()> {
    let service = BalanceService::new(storage);
    let mut summaries = service.summary(Utc::now())?;

    if let Some(account) = account {
        summaries.retain(|s| s.account == account);
        if summaries.is_empty() {
            println!("No transactions for account '{}'.", account);
            return Ok(());
        }
    }

    print!("{}", format_balance_summary(&summaries, settings));
    Ok(())
}

/// Handle the history command
pub fn handle_history_command(storage: &Storage, limit: usize) -> TallyResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
