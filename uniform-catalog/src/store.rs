use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{PoisonError, RwLock};

/// A simple key-value store for snapshot bytes.
///
/// Stores operate on raw bytes; encoding the catalog is handled by
/// [`Persistence`](crate::Persistence). Stores have no knowledge of items.
///
/// All methods take `&self` to support stores with internal locking (e.g., Fjall).
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the bytes associated with a key, or None if not present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores bytes at the given key, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Checks whether a key exists in the store.
    fn has(&self, key: &str) -> Result<bool, Self::Error>;
}

impl<S: Store + ?Sized> Store for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        (**self).put(key, value)
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        (**self).has(key)
    }
}

/// An in-memory store backed by a HashMap.
///
/// Useful for testing and as a reference implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn has(&self, key: &str) -> Result<bool, Self::Error> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(data.contains_key(key))
    }
}
