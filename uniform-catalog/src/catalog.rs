use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::filter::{self, Facets};
use crate::id::{IdGenerator, MonotonicIds};
use crate::item::{Item, ItemDraft, ItemId, ItemPatch, NEW_ITEM_WINDOW_MS, ValidationError};
use crate::persistence::Persistence;
use crate::schedule::Expiries;
use crate::seed::seed_items;
use crate::store::Store;

/// Why the catalog refused a change. State is untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no unused item ids left")]
    IdsExhausted,

    #[error("id {0} is already in use")]
    DuplicateId(ItemId),
}

/// The in-memory uniform catalog.
///
/// Owns the ordered item collection and the two filter facets. Every change
/// is mirrored to the backing [`Store`] as a full snapshot; the in-memory
/// state is authoritative and a failed write never fails the change.
///
/// The 24-hour "new" window is tracked in an [`Expiries`] schedule. Whoever
/// drives the catalog calls [`tick`](Self::tick) to apply due expiries, using
/// [`next_expiry`](Self::next_expiry) to know when the next one is due.
pub struct Catalog<S, C = SystemClock> {
    items: IndexMap<ItemId, Item>,
    facets: Facets,
    persistence: Persistence<S>,
    clock: C,
    ids: Box<dyn IdGenerator + Send>,
    expiries: Expiries,
}

impl<S: Store> Catalog<S> {
    /// Opens the catalog stored under the default key, using the wall clock
    /// and timestamp-shaped ids.
    pub fn open(store: S) -> Self {
        Self::initialize(Persistence::new(store), SystemClock, MonotonicIds::new())
    }
}

impl<S: Store, C: Clock> Catalog<S, C> {
    /// Builds the catalog from the persisted snapshot, or from the seed
    /// catalog when there is none or it cannot be decoded.
    ///
    /// Restored items are never new. The resulting collection is written
    /// back immediately.
    pub fn initialize(
        persistence: Persistence<S>,
        clock: C,
        ids: impl IdGenerator + Send + 'static,
    ) -> Self {
        let now = clock.now_millis();
        let loaded = match persistence.load() {
            Some(snapshot) => {
                info!(count = snapshot.len(), "restored catalog snapshot");
                snapshot.into_iter().map(|item| item.restore(now)).collect()
            }
            None => {
                info!("no usable snapshot, starting from seed catalog");
                seed_items(now)
            }
        };

        let mut ids: Box<dyn IdGenerator + Send> = Box::new(ids);
        let mut items = IndexMap::with_capacity(loaded.len());
        for item in loaded {
            if items.contains_key(&item.id) {
                warn!(id = %item.id, "dropping item with duplicate id");
                continue;
            }
            ids.observe(item.id);
            items.insert(item.id, item);
        }

        let catalog = Self {
            items,
            facets: Facets::default(),
            persistence,
            clock,
            ids,
            expiries: Expiries::new(),
        };
        catalog.persist();
        catalog
    }

    /// Every item, available or not, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a new item, or rejects the draft without touching state.
    pub fn add(&mut self, draft: ItemDraft) -> Result<Item, CatalogError> {
        draft.validate()?;

        let now = self.clock.now_millis();
        let id = self.ids.next_id(now).ok_or(CatalogError::IdsExhausted)?;
        if self.items.contains_key(&id) {
            warn!(%id, "id generator handed out an id already in use");
            return Err(CatalogError::DuplicateId(id));
        }
        let item = draft.into_item(id, now);

        self.items.insert(id, item.clone());
        self.expiries.schedule(id, now.saturating_add(NEW_ITEM_WINDOW_MS));
        debug!(%id, name = %item.name, "added item");

        self.persist();
        Ok(item)
    }

    /// Merges `patch` onto the item with `id`.
    ///
    /// Returns `Ok(None)` without changing anything when no such item exists.
    /// `created_at` and `is_new` are always kept.
    pub fn update(&mut self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, CatalogError> {
        let Some(item) = self.items.get_mut(&id) else {
            debug!(%id, "update of unknown item ignored");
            return Ok(None);
        };
        patch.validate()?;

        item.apply(patch);
        let updated = item.clone();
        debug!(%id, "updated item");

        self.persist();
        Ok(Some(updated))
    }

    /// Removes the item with `id` and cancels its pending expiry.
    ///
    /// Returns the removed item, or `None` when there was nothing to remove.
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.items.shift_remove(&id)?;
        self.expiries.cancel(id);
        debug!(%id, "deleted item");

        self.persist();
        Some(removed)
    }

    /// `"All"` followed by every distinct category, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        filter::categories(self.items.values())
    }

    /// Each category with its number of available items.
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        filter::category_counts(self.items.values())
    }

    /// Available items under the current facets, in insertion order.
    pub fn filtered_items(&self) -> Vec<&Item> {
        filter::filter_items(self.items.values(), &self.facets)
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn selected_category(&self) -> &str {
        &self.facets.category
    }

    pub fn set_selected_category(&mut self, category: impl Into<String>) {
        self.facets.category = category.into();
    }

    pub fn search_query(&self) -> &str {
        &self.facets.query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.facets.query = query.into();
    }

    /// Back to `"All"` and an empty search.
    pub fn reset_filters(&mut self) {
        self.facets = Facets::default();
    }

    /// Clears `is_new` on every item whose window has elapsed.
    ///
    /// Returns how many items changed. Deleted items were unscheduled when
    /// they were removed and are never touched.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_millis();
        let mut expired = 0;
        for id in self.expiries.take_due(now) {
            if let Some(item) = self.items.get_mut(&id).filter(|item| item.is_new) {
                item.is_new = false;
                expired += 1;
                debug!(%id, "item no longer new");
            }
        }

        if expired > 0 {
            self.persist();
        }
        expired
    }

    /// The earliest pending expiry, in Unix milliseconds.
    pub fn next_expiry(&self) -> Option<u64> {
        self.expiries.next_deadline()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn persist(&self) {
        let items: Vec<&Item> = self.items.values().collect();
        self.persistence.save(&items);
    }
}

impl<S, C> std::fmt::Debug for Catalog<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items.len())
            .field("facets", &self.facets)
            .field("pending_expiries", &self.expiries.len())
            .finish()
    }
}
