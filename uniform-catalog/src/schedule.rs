use std::collections::{BTreeSet, HashMap};

use crate::item::ItemId;

/// Pending one-shot deadlines keyed by item id.
///
/// Each id has at most one deadline. Cancelling an id removes its deadline,
/// so a deleted item can never be touched when its time comes.
#[derive(Debug, Default)]
pub struct Expiries {
    by_id: HashMap<ItemId, u64>,
    queue: BTreeSet<(u64, ItemId)>,
}

impl Expiries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `id` to expire at `at`, replacing any earlier deadline for it.
    pub fn schedule(&mut self, id: ItemId, at: u64) {
        if let Some(previous) = self.by_id.insert(id, at) {
            self.queue.remove(&(previous, id));
        }
        self.queue.insert((at, id));
    }

    /// Removes the deadline for `id`. Returns whether one was pending.
    pub fn cancel(&mut self, id: ItemId) -> bool {
        match self.by_id.remove(&id) {
            Some(at) => self.queue.remove(&(at, id)),
            None => false,
        }
    }

    /// Removes and returns every id whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: u64) -> Vec<ItemId> {
        let due = match now.checked_add(1) {
            Some(after) => {
                let later = self.queue.split_off(&(after, ItemId(0)));
                std::mem::replace(&mut self.queue, later)
            }
            None => std::mem::take(&mut self.queue),
        };

        due.into_iter()
            .map(|(_, id)| {
                self.by_id.remove(&id);
                id
            })
            .collect()
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.first().map(|(at, _)| *at)
    }

    pub fn is_scheduled(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
