use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ToolError;
use uniform_fjall::DEFAULT_CATALOG;

use crate::store::default_store_path;

/// Admin password used when the config file does not set one.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub admin: AdminConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    /// Named catalog inside the store; several schools can share one store.
    pub catalog: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("uniforms").join("config.toml"))
}

/// Loads the config from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ToolError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match config_path() {
            Some(path) => (path, false),
            None => return Ok(Config::default()),
        },
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) if !required => return Ok(Config::default()),
        Err(source) => return Err(ToolError::ConfigRead { path, source }),
    };

    toml::from_str(&content).map_err(|source| ToolError::Config { path, source })
}

/// Picks the store path and catalog name: CLI flag, then config, then default.
pub fn resolve_store_config(
    config: &Config,
    cli_path: Option<PathBuf>,
    cli_catalog: Option<String>,
) -> (PathBuf, String) {
    let store_path = cli_path
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(default_store_path);
    let catalog = cli_catalog
        .or_else(|| config.store.catalog.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

    (store_path, catalog)
}
