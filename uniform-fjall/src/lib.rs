//! Fjall-backed snapshot store for the uniform catalog.
//!
//! One database directory can hold several independent catalogs, for example
//! one per school. Each catalog gets its own keyspace, so their snapshots are
//! stored under the same key without ever overwriting each other.

use std::path::Path;

use fjall::{Database, Keyspace, KeyspaceCreateOptions};
use thiserror::Error;
use uniform_catalog::Store;

/// Catalog opened when no name is given.
pub const DEFAULT_CATALOG: &str = "catalog";

/// Longest accepted catalog name.
pub const MAX_CATALOG_NAME_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum FjallError {
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error(
        "invalid catalog name {0:?}: use 1 to {MAX_CATALOG_NAME_LEN} letters, digits, '-' or '_'"
    )]
    CatalogName(String),
}

/// A persistent store for one named catalog, backed by Fjall.
pub struct FjallStore {
    catalog: String,
    keyspace: Keyspace,
    _database: Database, // Keep keyspace alive
}

impl FjallStore {
    /// Opens the [`DEFAULT_CATALOG`] in the database at `path`.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FjallError> {
        Self::open_catalog(path, DEFAULT_CATALOG)
    }

    /// Opens the catalog called `catalog` in the database at `path`.
    ///
    /// Creates the database and the catalog's keyspace if they don't exist.
    pub fn open_catalog(path: impl AsRef<Path>, catalog: &str) -> Result<Self, FjallError> {
        validate_catalog_name(catalog)?;

        let database = Database::builder(path).open()?;
        let keyspace = database.keyspace(catalog, KeyspaceCreateOptions::default)?;
        Ok(Self {
            catalog: catalog.to_string(),
            keyspace,
            _database: database,
        })
    }

    /// Name of the catalog this store holds.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }
}

/// Checks that `name` can be used as a catalog (and keyspace) name.
pub fn validate_catalog_name(name: &str) -> Result<(), FjallError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_CATALOG_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(FjallError::CatalogName(name.to_string()))
    }
}

impl Store for FjallStore {
    type Error = FjallError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.keyspace.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.keyspace.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        Ok(self.keyspace.contains_key(key.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uniform_catalog::{Catalog, ItemDraft, ItemId, ItemPatch, STORAGE_KEY};

    #[test]
    fn snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = FjallStore::open(dir.path()).unwrap();
            assert!(!store.has(STORAGE_KEY).unwrap());
            store.put(STORAGE_KEY, b"[]").unwrap();
        }

        let store = FjallStore::open(dir.path()).unwrap();
        assert_eq!(store.catalog(), DEFAULT_CATALOG);
        assert_eq!(store.get(STORAGE_KEY).unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn catalogs_in_one_database_are_isolated() {
        let dir = TempDir::new().unwrap();

        {
            let north = FjallStore::open_catalog(dir.path(), "north-primary").unwrap();
            let mut catalog = Catalog::open(north);
            catalog.delete(ItemId(1));
            catalog
                .add(ItemDraft::new("School Jumper", "10", "Navy jumper").with_category("Jumpers"))
                .unwrap();
        }

        {
            let north =
                Catalog::open(FjallStore::open_catalog(dir.path(), "north-primary").unwrap());
            assert_eq!(north.len(), 8);
            assert!(north.get(ItemId(1)).is_none());
            assert!(north.categories().contains(&"Jumpers"));
        }

        let south = Catalog::open(FjallStore::open_catalog(dir.path(), "south_high").unwrap());
        assert_eq!(south.len(), 8);
        assert!(south.get(ItemId(1)).is_some());
        assert!(!south.categories().contains(&"Jumpers"));
    }

    #[test]
    fn catalog_changes_survive_restart() {
        let dir = TempDir::new().unwrap();

        {
            let mut catalog = Catalog::open(FjallStore::open(dir.path()).unwrap());
            catalog.delete(ItemId(5));
            catalog
                .update(
                    ItemId(6),
                    ItemPatch {
                        available: Some(false),
                        ..ItemPatch::default()
                    },
                )
                .unwrap();
        }

        let catalog = Catalog::open(FjallStore::open(dir.path()).unwrap());

        assert_eq!(catalog.len(), 7);
        assert!(catalog.get(ItemId(5)).is_none());
        assert_eq!(catalog.filtered_items().len(), 6);
    }

    #[test]
    fn rejects_unusable_catalog_names() {
        let dir = TempDir::new().unwrap();
        let too_long = "x".repeat(MAX_CATALOG_NAME_LEN + 1);

        for name in ["", "north primary", "../escape", "tie/belt", too_long.as_str()] {
            assert!(
                matches!(
                    FjallStore::open_catalog(dir.path(), name),
                    Err(FjallError::CatalogName(_))
                ),
                "{name:?} should be rejected"
            );
        }
        assert!(validate_catalog_name("St-Marys_2024").is_ok());
    }
}
