use std::path::{Path, PathBuf};

use thiserror::Error;
use uniform_fjall::{FjallError, FjallStore};

#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error("fjall error: {0}")]
    Fjall(#[from] FjallError),
    #[error("cannot create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Opens the named catalog in the database at `path`, creating the directory first.
pub fn open_store(path: impl AsRef<Path>, catalog: &str) -> Result<FjallStore, StoreOpenError> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|source| StoreOpenError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(FjallStore::open_catalog(path, catalog)?)
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("uniforms")
        .join("store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uniform_catalog::Store;

    #[test]
    fn open_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b");

        let store = open_store(&path, "catalog").unwrap();
        store.put("k", b"v").unwrap();

        assert!(path.is_dir());
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn bad_catalog_name_is_reported() {
        let dir = TempDir::new().unwrap();

        let result = open_store(dir.path(), "no spaces");

        assert!(matches!(
            result,
            Err(StoreOpenError::Fjall(FjallError::CatalogName(_)))
        ));
    }
}
