//! Core data models for Tally
//!
//! Transactions, recurring templates, money and the typed ids that link them.

pub mod ids;
pub mod money;
pub mod recurring;
pub mod transaction;

pub use ids::{RecurringId, TransactionId};
pub use money::Money;
pub use recurring::{Frequency, RecurringTransaction};
pub use transaction::{Transaction, TransactionValidationError};
