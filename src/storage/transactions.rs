//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Trashed
//! transactions are stored alongside live ones; filtering is left to callers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with an account index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account name -> transaction_ids
    by_account: RwLock<HashMap<String, Vec<TransactionId>>>,
}

/// Newest first, ties broken by creation time
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then(b.created_at.cmp(&a.created_at))
    });
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the index
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_account.clear();

        for txn in file_data.transactions {
            by_account
                .entry(txn.account.clone())
                .or_default()
                .push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find a transaction by full id or short display id
    ///
    /// Ambiguous short ids resolve to nothing.
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, TallyError> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }

        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = data.values().filter(|t| t.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            _ => Ok(None),
        }
    }

    /// All transactions, including trashed ones, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions for one account, newest first
    pub fn get_by_account(&self, account: &str) -> Result<Vec<Transaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_account.get(account).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Distinct account names, sorted
    pub fn accounts(&self) -> Result<Vec<String>, TallyError> {
        let by_account = self
            .by_account
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut names: Vec<_> = by_account
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_account
            .entry(txn.account.clone())
            .or_default()
            .push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction permanently
    pub fn remove(&self, id: TransactionId) -> Result<Option<Transaction>, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_account.get_mut(&txn.account) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
