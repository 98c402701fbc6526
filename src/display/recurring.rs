//! Recurring template display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::transaction::{format_date, truncate};
use crate::config::settings::Settings;
use crate::models::RecurringTransaction;

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Every")]
    every: String,
    #[tabled(rename = "Last generated")]
    last_generated: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn schedule(rec: &RecurringTransaction) -> String {
    let mut every = if rec.interval == 1 {
        rec.frequency.to_string()
    } else {
        format!("{} x {}", rec.interval, rec.frequency)
    };
    if rec.hold_as_pending {
        every.push_str(" (held)");
    }
    every
}

/// Format recurring templates as a table
pub fn format_recurring_list(templates: &[RecurringTransaction], settings: &Settings) -> String {
    if templates.is_empty() {
        return "No recurring transactions found.\n".to_string();
    }

    let rows: Vec<_> = templates
        .iter()
        .map(|r| RecurringRow {
            id: r.id.to_string(),
            account: r.account.clone(),
            description: truncate(&r.description, 32),
            amount: r.amount.format_with_symbol(&settings.currency_symbol),
            every: schedule(r),
            last_generated: r
                .last_generated
                .map(|d| format_date(d, settings))
                .unwrap_or_else(|| "-".into()),
            active: if r.active { "Yes" } else { "No" }.to_string(),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_recurring_list() {
        let settings = Settings::default();
        assert_eq!(
            format_recurring_list(&[], &settings),
            "No recurring transactions found.\n"
        );

        let mut rec = RecurringTransaction::new(
            "Checking",
            Money::from_cents(-1599),
            Frequency::Weekly,
            Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
        );
        rec.interval = 2;
        rec.hold_as_pending = true;
        rec.description = "Streaming".into();

        let output = format_recurring_list(&[rec], &settings);
        assert!(output.contains("Streaming"));
        assert!(output.contains("2 x weekly (held)"));
        assert!(output.contains("-$15.99"));
        assert!(output.contains("Yes"));
    }
}
