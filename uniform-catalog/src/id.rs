use crate::item::ItemId;

/// Hands out item ids. Every id returned is distinct from all ids previously
/// returned or observed.
pub trait IdGenerator {
    /// Returns a fresh id, or `None` once the id space is used up. `now` is
    /// the creation time in Unix milliseconds.
    fn next_id(&mut self, now: u64) -> Option<ItemId>;

    /// Records an id that already exists so it is never handed out.
    fn observe(&mut self, id: ItemId);
}

/// Timestamp-shaped ids that stay unique within a single millisecond.
///
/// Yields `now`, or one past the previous id when the clock has not moved on.
#[derive(Debug, Default)]
pub struct MonotonicIds {
    last: Option<u64>,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for MonotonicIds {
    fn next_id(&mut self, now: u64) -> Option<ItemId> {
        let id = match self.last {
            Some(last) => now.max(last.checked_add(1)?),
            None => now,
        };
        self.last = Some(id);
        Some(ItemId(id))
    }

    fn observe(&mut self, id: ItemId) {
        self.last = Some(self.last.map_or(id.0, |last| last.max(id.0)));
    }
}

/// Plain counter starting at 1.
#[derive(Debug)]
pub struct SequentialIds {
    /// `None` once `u64::MAX` has been handed out or observed.
    next: Option<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: Some(1) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, _now: u64) -> Option<ItemId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(ItemId(id))
    }

    fn observe(&mut self, id: ItemId) {
        self.next = match (self.next, id.0.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_ids_unique_within_same_millisecond() {
        let mut ids = MonotonicIds::new();

        let a = ids.next_id(1_000);
        let b = ids.next_id(1_000);
        let c = ids.next_id(1_000);

        assert_eq!(
            [a, b, c],
            [Some(ItemId(1_000)), Some(ItemId(1_001)), Some(ItemId(1_002))]
        );
    }

    #[test]
    fn monotonic_ids_follow_clock_when_it_moves_ahead() {
        let mut ids = MonotonicIds::new();

        ids.next_id(1_000);
        assert_eq!(ids.next_id(5_000), Some(ItemId(5_000)));
    }

    #[test]
    fn monotonic_ids_never_go_backwards() {
        let mut ids = MonotonicIds::new();
        ids.observe(ItemId(9_000));

        assert_eq!(ids.next_id(1_000), Some(ItemId(9_001)));
    }

    #[test]
    fn sequential_ids_skip_observed() {
        let mut ids = SequentialIds::new();
        ids.observe(ItemId(8));
        ids.observe(ItemId(3));

        assert_eq!(ids.next_id(0), Some(ItemId(9)));
        assert_eq!(ids.next_id(0), Some(ItemId(10)));
    }

    #[test]
    fn monotonic_ids_exhausted_after_max() {
        let mut ids = MonotonicIds::new();
        ids.observe(ItemId(u64::MAX));

        assert_eq!(ids.next_id(1_000), None);
        assert_eq!(ids.next_id(u64::MAX), None);
    }

    #[test]
    fn sequential_ids_exhausted_after_max() {
        let mut ids = SequentialIds::new();
        ids.observe(ItemId(u64::MAX - 1));

        assert_eq!(ids.next_id(0), Some(ItemId(u64::MAX)));
        assert_eq!(ids.next_id(0), None);

        let mut ids = SequentialIds::new();
        ids.observe(ItemId(u64::MAX));
        assert_eq!(ids.next_id(0), None);
    }
}
