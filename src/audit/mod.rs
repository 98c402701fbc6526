//! Audit logging system for Tally
//!
//! Records every create, update, trash, restore and purge with before/after
//! values in an append-only JSONL log.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.description.clone()),
//!     &txn,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
