//! Transaction service
//!
//! Creates transactions from amount expressions and moves them through the
//! pending, confirmed and trash states. Eligibility is always decided by the
//! `pending` policy at call time.

use chrono::{DateTime, Duration, Utc};

use crate::audit::{EntityType, Operation};
use crate::calc::evaluate_amount;
use crate::error::{TallyError, TallyResult};
use crate::models::Transaction;
use crate::pending::{
    confirmable, end_of_next_minute, split_by_pending_status, start_of_next_minute, PendingSplit,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone, Default)]
pub struct CreateTransactionInput {
    pub account: String,
    /// Amount as typed on a numeric pad, e.g. `12.50+3*2` or `-40`
    pub amount: String,
    /// Defaults to the current instant
    pub transaction_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub memo: Option<String>,
    /// Hold the transaction until it is explicitly confirmed
    pub pending: bool,
}

fn entity_name(txn: &Transaction) -> Option<String> {
    if txn.description.is_empty() {
        None
    } else {
        Some(txn.description.clone())
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TallyResult<Transaction> {
        let amount = evaluate_amount(&input.amount)?;
        let date = input.transaction_date.unwrap_or_else(Utc::now);

        let mut txn = Transaction::new(input.account.trim(), date, amount);
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(memo) = input.memo {
            txn.memo = memo;
        }
        txn.is_pending = input.pending;

        txn.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            entity_name(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    /// Find a transaction by id, including trashed ones
    pub fn find(&self, identifier: &str) -> TallyResult<Transaction> {
        self.storage
            .transactions
            .find(identifier)?
            .ok_or_else(|| TallyError::transaction_not_found(identifier))
    }

    /// Live transactions split at the canonical list boundary, newest first
    pub fn list(&self, now: DateTime<Utc>) -> TallyResult<PendingSplit<Transaction>> {
        let live = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| !t.is_deleted);

        Ok(split_by_pending_status(live, start_of_next_minute(now)))
    }

    /// Confirm a held transaction whose date has reached the grace boundary
    pub fn confirm(&self, identifier: &str, now: DateTime<Utc>) -> TallyResult<Transaction> {
        let before = self.find(identifier)?;
        let anchor = end_of_next_minute(now);

        if !confirmable(&before, anchor) {
            let reason = if before.is_deleted {
                "transaction is in the trash".to_string()
            } else if !before.is_pending {
                "transaction is not held pending".to_string()
            } else {
                format!(
                    "transaction is dated {} and cannot be confirmed yet",
                    before.transaction_date.format("%Y-%m-%d %H:%M UTC")
                )
            };
            return Err(TallyError::Pending(reason));
        }

        let mut txn = before.clone();
        txn.set_pending(false);
        self.save_change(Operation::Update, &before, &txn)?;
        Ok(txn)
    }

    /// Hold a live transaction as pending
    pub fn hold(&self, identifier: &str) -> TallyResult<Transaction> {
        let before = self.find(identifier)?;

        if before.is_deleted {
            return Err(TallyError::Pending("transaction is in the trash".into()));
        }
        if before.is_pending {
            return Err(TallyError::Pending("transaction is already held".into()));
        }

        let mut txn = before.clone();
        txn.set_pending(true);
        self.save_change(Operation::Update, &before, &txn)?;
        Ok(txn)
    }

    /// Move a transaction to the trash
    pub fn delete(&self, identifier: &str, now: DateTime<Utc>) -> TallyResult<Transaction> {
        let before = self.find(identifier)?;

        if before.is_deleted {
            return Err(TallyError::Validation(
                "Transaction is already in the trash".into(),
            ));
        }

        let mut txn = before.clone();
        txn.soft_delete(now);
        self.save_change(Operation::Delete, &before, &txn)?;
        Ok(txn)
    }

    /// Take a transaction back out of the trash
    pub fn restore(&self, identifier: &str) -> TallyResult<Transaction> {
        let before = self.find(identifier)?;

        if !before.is_deleted {
            return Err(TallyError::Validation(
                "Transaction is not in the trash".into(),
            ));
        }

        let mut txn = before.clone();
        txn.restore();
        self.save_change(Operation::Restore, &before, &txn)?;
        Ok(txn)
    }

    /// Trashed transactions, most recently deleted first
    pub fn trash(&self) -> TallyResult<Vec<Transaction>> {
        let mut trashed: Vec<_> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.is_deleted)
            .collect();
        trashed.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(trashed)
    }

    /// Permanently remove transactions deleted more than `retention_days` ago
    pub fn purge_trash(&self, now: DateTime<Utc>, retention_days: u32) -> TallyResult<usize> {
        // A retention period reaching past the calendar keeps everything
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(retention_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let expired: Vec<_> = self
            .trash()?
            .into_iter()
            .filter(|t| t.deleted_at.is_some_and(|at| at < cutoff))
            .collect();

        if expired.is_empty() {
            return Ok(0);
        }

        let mut purged = Vec::with_capacity(expired.len());
        for txn in expired {
            if let Some(removed) = self.storage.transactions.remove(txn.id)? {
                purged.push((removed.id.to_string(), entity_name(&removed), removed));
            }
        }

        self.storage.transactions.save()?;
        self.storage.log_purge(EntityType::Transaction, &purged)?;

        Ok(purged.len())
    }

    fn save_change(
        &self,
        operation: Operation,
        before: &Transaction,
        after: &Transaction,
    ) -> TallyResult<()> {
        self.storage.transactions.upsert(after.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_change(
            operation,
            EntityType::Transaction,
            after.id.to_string(),
            entity_name(after),
            before,
            after,
        )
    }
}
