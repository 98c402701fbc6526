//! Recurring template repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{RecurringId, RecurringTransaction};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecurringData {
    recurring: Vec<RecurringTransaction>,
}

/// Repository for recurring templates
pub struct RecurringRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecurringId, RecurringTransaction>>,
}

impl RecurringRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: RecurringData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for rec in file_data.recurring {
            data.insert(rec.id, rec);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let recurring = self.get_all()?;
        write_json_atomic(&self.path, &RecurringData { recurring })
    }

    pub fn get(&self, id: RecurringId) -> Result<Option<RecurringTransaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find a template by full id or short display id
    pub fn find(&self, identifier: &str) -> Result<Option<RecurringTransaction>, TallyError> {
        if let Ok(id) = identifier.parse::<RecurringId>() {
            return self.get(id);
        }

        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = data.values().filter(|r| r.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(rec), None) => Ok(Some(rec.clone())),
            _ => Ok(None),
        }
    }

    /// All templates ordered by start date
    pub fn get_all(&self) -> Result<Vec<RecurringTransaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut recurring: Vec<_> = data.values().cloned().collect();
        recurring.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(recurring)
    }

    pub fn upsert(&self, rec: RecurringTransaction) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(rec.id, rec);
        Ok(())
    }
}
