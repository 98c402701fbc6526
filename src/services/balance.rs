//! Balance service
//!
//! Balances only count transactions the list view shows as confirmed, so the
//! two always agree for the same `now`.

use chrono::{DateTime, Utc};

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, Transaction};
use crate::pending::{split_by_pending_status, start_of_next_minute, PendingSplit};
use crate::storage::Storage;

/// Per-account totals at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub account: String,
    /// Sum of confirmed transactions
    pub balance: Money,
    /// Sum of transactions still pending
    pub pending: Money,
    pub pending_count: usize,
}

impl AccountSummary {
    /// Balance once everything pending has cleared
    pub fn projected(&self) -> Option<Money> {
        self.balance.checked_add(self.pending)
    }
}

fn total(transactions: &[Transaction], account: &str) -> TallyResult<Money> {
    Money::checked_sum(transactions.iter().map(|t| t.amount)).ok_or_else(|| {
        TallyError::Validation(format!("Total for account '{}' is out of range", account))
    })
}

/// Service for balance calculation
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn split_account(
        &self,
        account: &str,
        now: DateTime<Utc>,
    ) -> TallyResult<PendingSplit<Transaction>> {
        let live = self
            .storage
            .transactions
            .get_by_account(account)?
            .into_iter()
            .filter(|t| !t.is_deleted);
        Ok(split_by_pending_status(live, start_of_next_minute(now)))
    }

    /// Confirmed balance of one account
    pub fn account_balance(&self, account: &str, now: DateTime<Utc>) -> TallyResult<Money> {
        let split = self.split_account(account, now)?;
        total(&split.confirmed, account)
    }

    /// Total still pending for one account
    pub fn pending_total(&self, account: &str, now: DateTime<Utc>) -> TallyResult<Money> {
        let split = self.split_account(account, now)?;
        total(&split.pending, account)
    }

    /// Summaries for every account that has transactions
    pub fn summary(&self, now: DateTime<Utc>) -> TallyResult<Vec<AccountSummary>> {
        let mut summaries = Vec::new();

        for account in self.storage.transactions.accounts()? {
            let split = self.split_account(&account, now)?;
            if split.is_empty() {
                continue;
            }
            summaries.push(AccountSummary {
                balance: total(&split.confirmed, &account)?,
                pending: total(&split.pending, &account)?,
                pending_count: split.pending.len(),
                account,
            });
        }

        Ok(summaries)
    }
}
