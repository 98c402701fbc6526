//! Pending-transaction policy
//!
//! Pure predicates deciding what "pending" means, shared by balance
//! computation, list filtering and confirm eligibility so they never
//! disagree. Every function takes the evaluation instant explicitly; nothing
//! in this module reads the wall clock.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use tally::models::{Money, Transaction};
//! use tally::pending::{effective_is_pending, split_by_pending_status, start_of_next_minute};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
//! let rent = Transaction::new("Checking", now - Duration::days(1), Money::from_cents(-90000));
//! let salary = Transaction::new("Checking", now + Duration::days(5), Money::from_cents(250000));
//!
//! assert!(!effective_is_pending(&rent, now));
//! assert!(effective_is_pending(&salary, now));
//!
//! let split = split_by_pending_status(vec![rent, salary], start_of_next_minute(now));
//! assert_eq!(split.confirmed.len(), 1);
//! assert_eq!(split.pending.len(), 1);
//! ```

mod policy;
mod state;

use chrono::{DateTime, Utc};

pub use policy::{
    confirmable, effective_is_pending, end_of_next_minute, holdable, is_confirmable_now,
    is_holdable_now, split_by_pending_status, start_of_next_minute, PendingSplit,
};
pub use state::{classify, PendingState};

/// The fields of a transaction the policy reads
pub trait PendingRecord {
    fn transaction_date(&self) -> DateTime<Utc>;

    fn is_pending(&self) -> bool;

    fn is_deleted(&self) -> bool {
        false
    }
}

impl<T: PendingRecord + ?Sized> PendingRecord for &T {
    fn transaction_date(&self) -> DateTime<Utc> {
        (**self).transaction_date()
    }

    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }

    fn is_deleted(&self) -> bool {
        (**self).is_deleted()
    }
}
