//! Recurring transaction service
//!
//! Manages recurring templates and turns their due occurrences into real
//! transactions.

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::audit::{EntityType, Operation};
use crate::calc::evaluate_amount;
use crate::error::{TallyError, TallyResult};
use crate::models::{Frequency, RecurringTransaction, Transaction};
use crate::storage::Storage;

use super::sync::RecurringSynchronizer;

/// Upper bound on occurrences generated for one template in a single sync
pub const MAX_OCCURRENCES_PER_SYNC: usize = 1000;

/// Input for creating a recurring template
#[derive(Debug, Clone)]
pub struct CreateRecurringInput {
    pub account: String,
    /// Amount expression, evaluated once at creation
    pub amount: String,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub hold_as_pending: bool,
}

/// Result of one synchronization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Active templates examined
    pub templates_checked: usize,
    /// Transactions generated across all templates
    pub transactions_created: usize,
}

/// Service for recurring templates
pub struct RecurringService<'a> {
    storage: &'a Storage,
}

fn entity_name(description: &str) -> Option<String> {
    if description.is_empty() {
        None
    } else {
        Some(description.to_string())
    }
}

/// Occurrence dates a template still owes at `now`
///
/// Every occurrence after `last_generated` dated at or before `now`, plus the
/// first upcoming one unless an upcoming occurrence was already generated.
fn due_occurrences(template: &RecurringTransaction, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut dates = Vec::new();
    let mut last = template.last_generated;

    for n in 0..u32::MAX {
        let Some(date) = template.occurrence(n) else {
            break;
        };
        if last.is_some_and(|l| date <= l) {
            continue;
        }
        if dates.len() >= MAX_OCCURRENCES_PER_SYNC {
            warn!(
                "Recurring template {} has more than {} due occurrences; the rest wait for the next sync",
                template.id, MAX_OCCURRENCES_PER_SYNC
            );
            break;
        }
        if date > now {
            if last.map_or(true, |l| l <= now) {
                dates.push(date);
            }
            break;
        }
        dates.push(date);
        last = Some(date);
    }

    dates
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new recurring template
    pub fn create(&self, input: CreateRecurringInput) -> TallyResult<RecurringTransaction> {
        let amount = evaluate_amount(&input.amount)?;

        let mut template = RecurringTransaction::new(
            input.account.trim(),
            amount,
            input.frequency,
            input.start_date,
        );
        template.interval = input.interval;
        template.end_date = input.end_date;
        template.hold_as_pending = input.hold_as_pending;
        if let Some(description) = input.description {
            template.description = description.trim().to_string();
        }

        template.validate().map_err(TallyError::Validation)?;

        self.storage.recurring.upsert(template.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_create(
            EntityType::RecurringTransaction,
            template.id.to_string(),
            entity_name(&template.description),
            &template,
        )?;

        Ok(template)
    }

    /// Find a template by id
    pub fn find(&self, identifier: &str) -> TallyResult<RecurringTransaction> {
        self.storage
            .recurring
            .find(identifier)?
            .ok_or_else(|| TallyError::recurring_not_found(identifier))
    }

    /// All templates, active or not
    pub fn list(&self) -> TallyResult<Vec<RecurringTransaction>> {
        self.storage.recurring.get_all()
    }

    /// Stop a template from generating further transactions
    pub fn deactivate(&self, identifier: &str) -> TallyResult<RecurringTransaction> {
        let before = self.find(identifier)?;
        if !before.active {
            return Err(TallyError::Recurring(format!(
                "{} is already inactive",
                before.id
            )));
        }

        let mut template = before.clone();
        template.active = false;
        template.updated_at = Utc::now();

        self.storage.recurring.upsert(template.clone())?;
        self.storage.recurring.save()?;
        self.storage.log_change(
            Operation::Update,
            EntityType::RecurringTransaction,
            template.id.to_string(),
            entity_name(&template.description),
            &before,
            &template,
        )?;

        Ok(template)
    }

    /// Generate every owed transaction for all active templates
    pub fn synchronize_all(&self, now: DateTime<Utc>) -> TallyResult<SyncReport> {
        let mut report = SyncReport::default();
        let mut created = Vec::new();
        let mut changed = Vec::new();

        for before in self.storage.recurring.get_all()? {
            if !before.active {
                continue;
            }
            report.templates_checked += 1;

            let dates = due_occurrences(&before, now);
            let Some(&newest) = dates.last() else {
                continue;
            };

            for date in dates {
                let mut txn = Transaction::with_details(
                    before.account.clone(),
                    date,
                    before.amount,
                    before.description.clone(),
                    before.hold_as_pending,
                );
                txn.recurring_id = Some(before.id);
                self.storage.transactions.upsert(txn.clone())?;
                created.push(txn);
            }

            let mut template = before.clone();
            template.last_generated = Some(newest);
            template.updated_at = Utc::now();
            self.storage.recurring.upsert(template.clone())?;
            changed.push((before, template));
        }

        if created.is_empty() {
            return Ok(report);
        }

        self.storage.transactions.save()?;
        self.storage.recurring.save()?;

        for txn in &created {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                entity_name(&txn.description),
                txn,
            )?;
        }
        for (before, after) in &changed {
            self.storage.log_change(
                Operation::Update,
                EntityType::RecurringTransaction,
                after.id.to_string(),
                entity_name(&after.description),
                before,
                after,
            )?;
        }

        report.transactions_created = created.len();
        info!(
            "Recurring sync created {} transaction(s) from {} template(s)",
            report.transactions_created,
            changed.len()
        );

        Ok(report)
    }
}

impl RecurringSynchronizer for RecurringService<'_> {
    fn synchronize_all(&self, now: DateTime<Utc>) -> TallyResult<SyncReport> {
        RecurringService::synchronize_all(self, now)
    }
}
