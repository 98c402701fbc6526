//! Derived per-transaction pending state
//!
//! Nothing here is stored. `classify` recomputes the state from the record and
//! the current instant every time, so a state can never go stale as the clock
//! advances.

use chrono::{DateTime, Utc};
use std::fmt;

use super::policy::{effective_is_pending, is_confirmable_now, start_of_next_minute};
use super::PendingRecord;

/// Where a transaction stands relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    /// In the trash
    Deleted,
    /// Counts toward balances
    ConfirmedPast,
    /// Held pending and dated inside the confirmation window
    PendingHeld,
    /// Dated ahead of the split boundary
    PendingFuture,
}

impl PendingState {
    /// Whether the transaction counts toward balances in this state
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, Self::ConfirmedPast)
    }
}

impl fmt::Display for PendingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => write!(f, "Deleted"),
            Self::ConfirmedPast => write!(f, "Confirmed"),
            Self::PendingHeld => write!(f, "Awaiting confirmation"),
            Self::PendingFuture => write!(f, "Upcoming"),
        }
    }
}

/// Classify a record using the same boundaries as listing and confirmation
///
/// Confirmability is judged at `end_of_next_minute(now)`, the pending/confirmed
/// split at `start_of_next_minute(now)`.
pub fn classify<T: PendingRecord + ?Sized>(tx: &T, now: DateTime<Utc>) -> PendingState {
    if tx.is_deleted() {
        PendingState::Deleted
    } else if is_confirmable_now(tx, now) {
        PendingState::PendingHeld
    } else if effective_is_pending(tx, start_of_next_minute(now)) {
        PendingState::PendingFuture
    } else {
        PendingState::ConfirmedPast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct Row(DateTime<Utc>, bool, bool);

    impl PendingRecord for Row {
        fn transaction_date(&self) -> DateTime<Utc> {
            self.0
        }
        fn is_pending(&self) -> bool {
            self.1
        }
        fn is_deleted(&self) -> bool {
            self.2
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 30).unwrap()
    }

    #[test]
    fn test_classify_states() {
        let now = now();
        let past = now - Duration::days(3);
        let future = now + Duration::days(3);

        assert_eq!(classify(&Row(past, false, true), now), PendingState::Deleted);
        assert_eq!(classify(&Row(past, false, false), now), PendingState::ConfirmedPast);
        assert_eq!(classify(&Row(past, true, false), now), PendingState::PendingHeld);
        assert_eq!(classify(&Row(future, true, false), now), PendingState::PendingFuture);
        assert_eq!(classify(&Row(future, false, false), now), PendingState::PendingFuture);
    }

    #[test]
    fn test_state_follows_clock() {
        let tx = Row(now() + Duration::hours(2), true, false);
        assert_eq!(classify(&tx, now()), PendingState::PendingFuture);
        assert_eq!(
            classify(&tx, now() + Duration::hours(2)),
            PendingState::PendingHeld
        );
    }

    #[test]
    fn test_only_confirmed_counts() {
        assert!(PendingState::ConfirmedPast.counts_toward_balance());
        assert!(!PendingState::PendingHeld.counts_toward_balance());
        assert!(!PendingState::PendingFuture.counts_toward_balance());
        assert!(!PendingState::Deleted.counts_toward_balance());
    }
}
