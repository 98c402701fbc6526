//! Balance summary display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Money;
use crate::services::AccountSummary;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Pending")]
    pending: String,
    #[tabled(rename = "Projected")]
    projected: String,
}

/// Format per-account balances with a totals row
pub fn format_balance_summary(summaries: &[AccountSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No transactions recorded yet.\n".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let amount = |m: Option<Money>| match m {
        Some(m) => m.format_with_symbol(symbol),
        None => "out of range".to_string(),
    };
    let pending = |s: &AccountSummary| {
        if s.pending_count == 0 {
            "-".to_string()
        } else {
            format!(
                "{} ({})",
                s.pending.format_with_symbol(symbol),
                s.pending_count
            )
        }
    };

    let mut rows: Vec<_> = summaries
        .iter()
        .map(|s| BalanceRow {
            account: s.account.clone(),
            balance: s.balance.format_with_symbol(symbol),
            pending: pending(s),
            projected: amount(s.projected()),
        })
        .collect();

    if summaries.len() > 1 {
        let balance = Money::checked_sum(summaries.iter().map(|s| s.balance));
        let pending_total = Money::checked_sum(summaries.iter().map(|s| s.pending));
        let projected = balance
            .zip(pending_total)
            .and_then(|(b, p)| b.checked_add(p));
        rows.push(BalanceRow {
            account: "Total".into(),
            balance: amount(balance),
            pending: amount(pending_total),
            projected: amount(projected),
        });
    }

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_summary() {
        let summaries = vec![
            AccountSummary {
                account: "Checking".into(),
                balance: Money::from_cents(150_000),
                pending: Money::from_cents(-2_500),
                pending_count: 2,
            },
            AccountSummary {
                account: "Savings".into(),
                balance: Money::from_cents(500_000),
                pending: Money::zero(),
                pending_count: 0,
            },
        ];

        let output = format_balance_summary(&summaries, &Settings::default());
        assert!(output.contains("$1500.00"));
        assert!(output.contains("-$25.00 (2)"));
        assert!(output.contains("$1475.00"));
        assert!(output.contains("Total"));
        assert!(output.contains("$6475.00"));
    }

    #[test]
    fn test_totals_out_of_range() {
        let summaries = vec![
            AccountSummary {
                account: "Vault A".into(),
                balance: Money::from_cents(i64::MAX - 10),
                pending: Money::zero(),
                pending_count: 0,
            },
            AccountSummary {
                account: "Vault B".into(),
                balance: Money::from_cents(100),
                pending: Money::from_cents(-5),
                pending_count: 1,
            },
        ];

        let output = format_balance_summary(&summaries, &Settings::default());
        assert!(output.contains("Vault A"));
        assert!(output.contains("$0.95"));
        assert!(output.contains("out of range"));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            format_balance_summary(&[], &Settings::default()),
            "No transactions recorded yet.\n"
        );
    }
}
