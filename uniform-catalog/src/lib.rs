//! Uniform Catalog is the in-memory store behind the uniform exchange.
//!
//! Core concepts:
//! - **Item**: a donated uniform piece, identified by a never-reused [`ItemId`]
//! - **Catalog**: owns the ordered item collection and the two filter facets
//! - **Facets**: the selected category and search text applied to the public listing
//! - **Persistence**: mirrors every change to a byte-level [`Store`] as a JSON snapshot
//! - **Expiries**: one-shot deadlines that clear the `is_new` flag 24 hours after creation
//!
//! # Example
//!
//! ```
//! use uniform_catalog::{Catalog, ItemDraft, ManualClock, MemoryStore, Persistence, SequentialIds};
//!
//! let clock = ManualClock::new(1_700_000_000_000);
//! let mut catalog = Catalog::initialize(
//!     Persistence::new(MemoryStore::new()),
//!     clock.clone(),
//!     SequentialIds::new(),
//! );
//!
//! // No snapshot yet, so the seed catalog is loaded
//! assert_eq!(catalog.len(), 8);
//!
//! let tie = catalog
//!     .add(ItemDraft::new("Tie", "Standard", "Striped school tie").with_category("Accessories"))
//!     .unwrap();
//! assert!(tie.is_new);
//!
//! catalog.set_search_query("tie");
//! assert_eq!(catalog.filtered_items().len(), 2);
//! ```

mod catalog;
mod clock;
pub mod filter;
mod id;
mod item;
mod persistence;
mod schedule;
pub mod seed;
mod store;

pub use catalog::{Catalog, CatalogError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use filter::{ALL_CATEGORIES, Facets};
pub use id::{IdGenerator, MonotonicIds, SequentialIds};
pub use item::{
    CONDITIONS, DEFAULT_CATEGORY, DEFAULT_CONDITION, Field, Item, ItemDraft, ItemId, ItemPatch,
    NEW_ITEM_WINDOW_MS, ValidationError,
};
pub use persistence::{Persistence, PersistenceError, STORAGE_KEY, SnapshotItem};
pub use schedule::Expiries;
pub use store::{MemoryStore, Store};
