//! Pending-transaction predicates
//!
//! Two boundaries are derived from "now":
//!
//! - `start_of_next_minute(now)` splits confirmed from pending lists.
//! - `end_of_next_minute(now)` is the last instant a held transaction may be
//!   dated and still be confirmable.
//!
//! The second lies 59.999s after the first. A held transaction dated inside
//! `(start, end]` is both holdable and confirmable; that overlap is the grace
//! window and it never exceeds one minute.

use chrono::{DateTime, Duration, Timelike, Utc};

use super::PendingRecord;

/// Truncate to the start of the anchor's minute
fn truncate_to_minute(anchor: DateTime<Utc>) -> DateTime<Utc> {
    let offset = Duration::seconds(i64::from(anchor.second()))
        + Duration::nanoseconds(i64::from(anchor.nanosecond()));
    anchor
        .checked_sub_signed(offset)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn saturating_add(anchor: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    anchor
        .checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// True when the transaction is dated after `now` or explicitly held pending
///
/// A transaction dated exactly `now` is not pending by date alone.
pub fn effective_is_pending<T: PendingRecord + ?Sized>(tx: &T, now: DateTime<Utc>) -> bool {
    tx.transaction_date() > now || tx.is_pending()
}

/// First instant of the minute after the anchor's minute
pub fn start_of_next_minute(anchor: DateTime<Utc>) -> DateTime<Utc> {
    saturating_add(truncate_to_minute(anchor), Duration::minutes(1))
}

/// Last millisecond of the minute after the anchor's minute
pub fn end_of_next_minute(anchor: DateTime<Utc>) -> DateTime<Utc> {
    let end_of_minute = saturating_add(truncate_to_minute(anchor), Duration::milliseconds(59_999));
    saturating_add(end_of_minute, Duration::minutes(1))
}

/// Whether a held transaction may be confirmed at `anchor`
///
/// Only explicitly pending, non-deleted transactions are ever confirmable;
/// a future date alone is not enough.
pub fn confirmable<T: PendingRecord + ?Sized>(tx: &T, anchor: DateTime<Utc>) -> bool {
    if tx.is_deleted() || !tx.is_pending() {
        return false;
    }
    tx.transaction_date() <= anchor
}

/// `confirmable` at the default anchor, `end_of_next_minute(now)`
pub fn is_confirmable_now<T: PendingRecord + ?Sized>(tx: &T, now: DateTime<Utc>) -> bool {
    confirmable(tx, end_of_next_minute(now))
}

/// Whether a held transaction is still dated after `anchor`
pub fn holdable<T: PendingRecord + ?Sized>(tx: &T, anchor: DateTime<Utc>) -> bool {
    if tx.is_deleted() || !tx.is_pending() {
        return false;
    }
    tx.transaction_date() > anchor
}

/// `holdable` at the default anchor, `start_of_next_minute(now)`
pub fn is_holdable_now<T: PendingRecord + ?Sized>(tx: &T, now: DateTime<Utc>) -> bool {
    holdable(tx, start_of_next_minute(now))
}

/// Items partitioned by `effective_is_pending`
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSplit<T> {
    /// Items that count toward balances and history
    pub confirmed: Vec<T>,
    /// Items shown in the upcoming/pending section
    pub pending: Vec<T>,
}

impl<T> Default for PendingSplit<T> {
    fn default() -> Self {
        Self {
            confirmed: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<T> PendingSplit<T> {
    pub fn len(&self) -> usize {
        self.confirmed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.pending.is_empty()
    }
}

/// Partition items into confirmed and pending, preserving relative order
///
/// Pass `start_of_next_minute(now)` as `now` for the canonical list boundary.
pub fn split_by_pending_status<T, I>(items: I, now: DateTime<Utc>) -> PendingSplit<T>
where
    I: IntoIterator<Item = T>,
    T: PendingRecord,
{
    let mut split = PendingSplit::default();
    for item in items {
        if effective_is_pending(&item, now) {
            split.pending.push(item);
        } else {
            split.confirmed.push(item);
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        label: &'static str,
        date: DateTime<Utc>,
        pending: bool,
        deleted: bool,
    }

    impl PendingRecord for Record {
        fn transaction_date(&self) -> DateTime<Utc> {
            self.date
        }
        fn is_pending(&self) -> bool {
            self.pending
        }
        fn is_deleted(&self) -> bool {
            self.deleted
        }
    }

    fn record(label: &'static str, date: DateTime<Utc>, pending: bool) -> Record {
        Record {
            label,
            date,
            pending,
            deleted: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 14, 25, 37).unwrap() + Duration::milliseconds(420)
    }

    #[test]
    fn test_start_of_next_minute() {
        assert_eq!(
            start_of_next_minute(now()),
            Utc.with_ymd_and_hms(2025, 3, 10, 14, 26, 0).unwrap()
        );

        let on_boundary = Utc.with_ymd_and_hms(2025, 3, 10, 14, 25, 0).unwrap();
        assert_eq!(
            start_of_next_minute(on_boundary),
            Utc.with_ymd_and_hms(2025, 3, 10, 14, 26, 0).unwrap()
        );
    }

    #[test]
    fn test_end_of_next_minute() {
        assert_eq!(
            end_of_next_minute(now()),
            Utc.with_ymd_and_hms(2025, 3, 10, 14, 26, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_next_minute_rolls_over_day() {
        let late = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 30).unwrap();
        assert_eq!(
            start_of_next_minute(late),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_effective_is_pending_by_date() {
        let now = now();
        assert!(!effective_is_pending(&record("past", now - Duration::days(1), false), now));
        assert!(!effective_is_pending(&record("exact", now, false), now));
        assert!(effective_is_pending(
            &record("future", now + Duration::milliseconds(1), false),
            now
        ));
    }

    #[test]
    fn test_pending_flag_always_wins() {
        let now = now();
        for offset in [-10_000, -1, 0, 1, 10_000] {
            let tx = record("held", now + Duration::minutes(offset), true);
            assert!(effective_is_pending(&tx, now));
        }
    }

    #[test]
    fn test_confirmable_requires_pending_flag() {
        let now = now();
        let anchor = end_of_next_minute(now);

        assert!(!confirmable(&record("plain past", now - Duration::hours(1), false), anchor));
        assert!(!confirmable(&record("plain future", now + Duration::hours(1), false), anchor));
        assert!(confirmable(&record("held past", now - Duration::hours(1), true), anchor));
        assert!(confirmable(&record("held at anchor", anchor, true), anchor));
        assert!(!confirmable(
            &record("held after anchor", anchor + Duration::milliseconds(1), true),
            anchor
        ));
    }

    #[test]
    fn test_deleted_is_never_confirmable_or_holdable() {
        let now = now();
        for offset in [-60, 0, 60] {
            for pending in [true, false] {
                let mut tx = record("trash", now + Duration::minutes(offset), pending);
                tx.deleted = true;
                assert!(!confirmable(&tx, end_of_next_minute(now)));
                assert!(!is_confirmable_now(&tx, now));
                assert!(!holdable(&tx, start_of_next_minute(now)));
            }
        }
    }

    #[test]
    fn test_holdable() {
        let now = now();
        let anchor = start_of_next_minute(now);

        assert!(holdable(&record("held future", anchor + Duration::seconds(1), true), anchor));
        assert!(!holdable(&record("held at anchor", anchor, true), anchor));
        assert!(!holdable(&record("plain future", anchor + Duration::hours(1), false), anchor));
        assert!(is_holdable_now(
            &record("held tomorrow", now + Duration::days(1), true),
            now
        ));
    }

    #[test]
    fn test_grace_window_overlap_is_bounded() {
        let now = now();
        let start = start_of_next_minute(now);
        let end = end_of_next_minute(now);
        assert!(end - start < Duration::minutes(1));

        // Sample every 250ms from two minutes before to two minutes after the window
        let mut probe = start - Duration::minutes(2);
        while probe <= end + Duration::minutes(2) {
            let tx = record("held", probe, true);
            let both = holdable(&tx, start) && confirmable(&tx, end);
            assert_eq!(both, probe > start && probe <= end, "probe {}", probe);
            probe = probe + Duration::milliseconds(250);
        }
    }

    #[test]
    fn test_split_preserves_order_and_partitions() {
        let now = now();
        let items = vec![
            record("a", now - Duration::days(2), false),
            record("b", now + Duration::days(1), false),
            record("c", now - Duration::days(1), true),
            record("d", now - Duration::hours(1), false),
            record("e", now + Duration::hours(3), true),
        ];

        let split = split_by_pending_status(items.clone(), now);
        let confirmed: Vec<_> = split.confirmed.iter().map(|r| r.label).collect();
        let pending: Vec<_> = split.pending.iter().map(|r| r.label).collect();

        assert_eq!(confirmed, vec!["a", "d"]);
        assert_eq!(pending, vec!["b", "c", "e"]);
        assert_eq!(split.len(), items.len());
    }

    #[test]
    fn test_split_by_reference() {
        let now = now();
        let items = [
            record("a", now - Duration::days(2), false),
            record("b", now + Duration::days(1), false),
        ];

        let split = split_by_pending_status(items.iter(), start_of_next_minute(now));
        assert_eq!(split.confirmed, vec![&items[0]]);
        assert_eq!(split.pending, vec![&items[1]]);
    }

    #[test]
    fn test_split_boundary_absorbs_current_minute() {
        let now = now();
        let items = vec![record("in a few seconds", now + Duration::seconds(10), false)];

        assert_eq!(split_by_pending_status(items.clone(), now).pending.len(), 1);
        assert_eq!(
            split_by_pending_status(items, start_of_next_minute(now))
                .confirmed
                .len(),
            1
        );
    }

    #[test]
    fn test_empty_split() {
        let split = split_by_pending_status(Vec::<Record>::new(), now());
        assert!(split.is_empty());
    }
}
