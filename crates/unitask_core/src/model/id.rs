//! Timestamp-based id allocation.

use chrono::NaiveDateTime;

/// Allocates creation-timestamp-based integer ids.
///
/// # Invariants
/// - Every returned id is strictly greater than every id previously returned
///   or observed, so ids stay unique even when two records are created within
///   the same millisecond or the clock steps backwards.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the allocator from ids already present in a loaded collection.
    pub fn observe(&mut self, ids: impl IntoIterator<Item = i64>) {
        for id in ids {
            self.last = self.last.max(id);
        }
    }

    /// Returns a fresh id derived from `now` in epoch milliseconds.
    pub fn next(&mut self, now: NaiveDateTime) -> i64 {
        let candidate = now.and_utc().timestamp_millis();
        let id = candidate.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;
    use chrono::NaiveDate;

    #[test]
    fn ids_are_strictly_increasing_within_one_millisecond() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut ids = IdAllocator::new();
        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(first, now.and_utc().timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let future_id = now.and_utc().timestamp_millis() + 5_000;
        let mut ids = IdAllocator::new();
        ids.observe([3, future_id, 7]);
        assert_eq!(ids.next(now), future_id + 1);
    }
}
