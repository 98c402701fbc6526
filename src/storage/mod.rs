//! Storage layer for Tally
//!
//! JSON file storage with atomic writes, plus the audit trail every
//! mutation is recorded in.

pub mod file_io;
pub mod recurring;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use recurring::RecurringRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub recurring: RecurringRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            recurring: RecurringRepository::new(paths.recurring_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TallyError> {
        self.transactions.load()?;
        self.recurring.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TallyError> {
        self.transactions.save()?;
        self.recurring.save()?;
        Ok(())
    }

    /// Record a newly created entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a state change with a generated diff
    pub fn log_change<T: Serialize>(
        &self,
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TallyError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::change(
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record entities removed for good
    pub fn log_purge<T: Serialize>(
        &self,
        entity_type: EntityType,
        entities: &[(String, Option<String>, T)],
    ) -> Result<(), TallyError> {
        let entries: Vec<_> = entities
            .iter()
            .map(|(id, name, entity)| AuditEntry::purge(entity_type, id.clone(), name.clone(), entity))
            .collect();
        self.audit.log_batch(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        storage.save_all().unwrap();
        assert!(temp_dir.path().join("data").join("transactions.json").exists());
        assert!(temp_dir.path().join("data").join("recurring.json").exists());
    }

    #[test]
    fn test_log_change_records_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_change(
                Operation::Update,
                EntityType::Transaction,
                "txn-1".into(),
                None,
                &json!({"is_pending": true}),
                &json!({"is_pending": false}),
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("is_pending: true -> false")
        );
    }
}
