//! Transaction model
//!
//! A ledger entry with a timestamp, an explicit pending flag and a soft-delete
//! flag. Whether a transaction counts toward a balance is never stored; it is
//! derived from these fields by the `pending` policy each time it is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{RecurringId, TransactionId};
use super::money::Money;
use crate::pending::PendingRecord;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Name of the account this transaction belongs to
    pub account: String,

    /// When the transaction takes effect
    pub transaction_date: DateTime<Utc>,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub memo: String,

    /// Explicit manual hold; cleared by confirming the transaction
    #[serde(default)]
    pub is_pending: bool,

    /// Soft-delete flag; deleted transactions live in the trash
    #[serde(default)]
    pub is_deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Recurring template that generated this transaction, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<RecurringId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new, non-pending transaction
    pub fn new(
        account: impl Into<String>,
        transaction_date: DateTime<Utc>,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account: account.into(),
            transaction_date,
            amount,
            description: String::new(),
            memo: String::new(),
            is_pending: false,
            is_deleted: false,
            deleted_at: None,
            recurring_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with a description and pending flag
    pub fn with_details(
        account: impl Into<String>,
        transaction_date: DateTime<Utc>,
        amount: Money,
        description: impl Into<String>,
        is_pending: bool,
    ) -> Self {
        let mut txn = Self::new(account, transaction_date, amount);
        txn.description = description.into();
        txn.is_pending = is_pending;
        txn
    }

    pub fn set_pending(&mut self, is_pending: bool) {
        self.is_pending = is_pending;
        self.updated_at = Utc::now();
    }

    /// Move the transaction to the trash
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Take the transaction back out of the trash
    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.account.trim().is_empty() {
            return Err(TransactionValidationError::MissingAccount);
        }

        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }

        if self.is_deleted != self.deleted_at.is_some() {
            return Err(TransactionValidationError::InconsistentTrashState);
        }

        Ok(())
    }
}

impl PendingRecord for Transaction {
    fn transaction_date(&self) -> DateTime<Utc> {
        self.transaction_date
    }

    fn is_pending(&self) -> bool {
        self.is_pending
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.transaction_date.format("%Y-%m-%d %H:%M"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingAccount,
    ZeroAmount,
    InconsistentTrashState,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccount => write!(f, "Transaction must belong to an account"),
            Self::ZeroAmount => write!(f, "Transaction amount cannot be zero"),
            Self::InconsistentTrashState => {
                write!(f, "Deleted transactions must record when they were deleted")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new("Checking", date(), Money::from_cents(-5000));
        assert_eq!(txn.account, "Checking");
        assert_eq!(txn.transaction_date, date());
        assert!(!txn.is_pending);
        assert!(!txn.is_deleted);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut txn = Transaction::new("Checking", date(), Money::from_cents(-5000));

        txn.soft_delete(date());
        assert!(txn.is_deleted);
        assert_eq!(txn.deleted_at, Some(date()));
        assert!(txn.validate().is_ok());

        txn.restore();
        assert!(!txn.is_deleted);
        assert!(txn.deleted_at.is_none());
    }

    #[test]
    fn test_validation() {
        let txn = Transaction::new("  ", date(), Money::from_cents(100));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingAccount)
        );

        let txn = Transaction::new("Checking", date(), Money::zero());
        assert_eq!(txn.validate(), Err(TransactionValidationError::ZeroAmount));

        let mut txn = Transaction::new("Checking", date(), Money::from_cents(100));
        txn.is_deleted = true;
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::InconsistentTrashState)
        );
    }

    #[test]
    fn test_serialization_defaults() {
        let txn = Transaction::with_details(
            "Savings",
            date(),
            Money::from_cents(12000),
            "Paycheck",
            true,
        );

        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("deleted_at"));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert!(deserialized.is_pending);
        assert_eq!(deserialized.description, "Paycheck");
    }

    #[test]
    fn test_display() {
        let txn = Transaction::with_details(
            "Checking",
            date(),
            Money::from_cents(-5000),
            "Groceries",
            false,
        );
        assert_eq!(format!("{}", txn), "2025-01-15 09:30 Groceries -$50.00");
    }
}
