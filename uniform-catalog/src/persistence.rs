use serde::Deserialize;
use tracing::warn;

use crate::item::{DEFAULT_CONDITION, Item, ItemId, NEW_ITEM_WINDOW_MS, non_blank};
use crate::store::Store;

/// Key the catalog snapshot is stored under.
pub const STORAGE_KEY: &str = "uniformItems";

/// Error type for snapshot reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// One entry of a persisted snapshot, before it is restored into an [`Item`].
///
/// `id`, `name`, `category`, `size` and `description` are required; a snapshot
/// with any entry missing one fails to decode as a whole. `isNew` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub size: String,
    #[serde(default)]
    pub condition: Option<String>,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub created_at: Option<u64>,
}

impl SnapshotItem {
    /// Converts to an item that is never new. A missing creation time is
    /// backfilled to one full window before `now`.
    pub fn restore(self, now: u64) -> Item {
        Item {
            id: self.id,
            name: self.name,
            category: self.category,
            size: self.size,
            condition: non_blank(self.condition).unwrap_or_else(|| DEFAULT_CONDITION.into()),
            description: self.description,
            image: non_blank(self.image),
            available: self.available,
            created_at: self
                .created_at
                .unwrap_or_else(|| now.saturating_sub(NEW_ITEM_WINDOW_MS)),
            is_new: false,
        }
    }
}

/// Mirrors the item collection to a [`Store`] as a JSON array under one key.
///
/// [`load`](Self::load) and [`save`](Self::save) never fail; problems are
/// logged and reported as an absent snapshot or a skipped write.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: Store> Persistence<S> {
    /// Uses the default [`STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the snapshot, or `None` if nothing is stored.
    pub fn try_load(&self) -> Result<Option<Vec<SnapshotItem>>, PersistenceError> {
        let Some(bytes) = self
            .store
            .get(&self.key)
            .map_err(|e| PersistenceError::Store(Box::new(e)))?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(PersistenceError::Decode)
    }

    /// Like [`try_load`](Self::try_load), but logs failures and reports them as absence.
    pub fn load(&self) -> Option<Vec<SnapshotItem>> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to load catalog snapshot");
                None
            }
        }
    }

    /// Encodes and writes the full collection.
    pub fn try_save(&self, items: &[&Item]) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(items).map_err(PersistenceError::Encode)?;
        self.store
            .put(&self.key, &bytes)
            .map_err(|e| PersistenceError::Store(Box::new(e)))
    }

    /// Like [`try_save`](Self::try_save), but logs failures instead of returning them.
    pub fn save(&self, items: &[&Item]) {
        if let Err(err) = self.try_save(items) {
            warn!(key = %self.key, error = %err, "failed to save catalog snapshot");
        }
    }
}
