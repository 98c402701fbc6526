//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and pending-status labels.

pub mod balance;
pub mod recurring;
pub mod transaction;

pub use balance::format_balance_summary;
pub use recurring::format_recurring_list;
pub use transaction::{
    format_date, format_transaction_details, format_transaction_split, format_transaction_table,
    format_trash,
};
