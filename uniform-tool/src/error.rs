use std::path::PathBuf;

use thiserror::Error;
use uniform_catalog::{CatalogError, ItemId};

use crate::store::StoreOpenError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Admin password required. Pass --password or set UNIFORMS_PASSWORD")]
    PasswordRequired,

    #[error("Incorrect admin password")]
    IncorrectPassword,

    #[error("Config error in {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreOpenError),

    #[error("Rejected: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Failed to encode item: {0}")]
    Encode(#[from] serde_json::Error),
}
