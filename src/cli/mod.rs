//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balance;
pub mod calc;
pub mod recurring;
pub mod transaction;
pub mod watch;

pub use balance::{handle_balance_command, handle_history_command};
pub use calc::handle_calc_command;
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use watch::handle_watch_command;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{TallyError, TallyResult};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse a user-supplied date or date-time in local time
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM` and plain
/// `YYYY-MM-DD` (local midnight).
pub fn parse_datetime(input: &str) -> TallyResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            TallyError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM",
                input
            ))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TallyError::Validation(format!("'{}' does not exist in local time", input)))
}
