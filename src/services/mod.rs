//! Service layer for Tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, pending-state transitions and recurring generation.

pub mod balance;
pub mod recurring;
pub mod sync;
pub mod transaction;

pub use balance::{AccountSummary, BalanceService};
pub use recurring::{CreateRecurringInput, RecurringService, SyncReport};
pub use sync::{AppState, ForegroundSync, RecurringSynchronizer, SyncOutcome};
pub use transaction::{CreateTransactionInput, TransactionService};
