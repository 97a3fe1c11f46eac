//! Command-line front-end for the uniform exchange catalog.

mod commands;
mod config;
mod error;
mod logging;
mod render;
mod store;

use std::path::PathBuf;

use clap::Parser;
use uniform_catalog::Catalog;

use crate::commands::Command;
use crate::config::{load_config, resolve_store_config};
use crate::store::open_store;

#[derive(Parser)]
#[command(name = "uniforms")]
#[command(about = "Browse and manage donated school uniforms", long_about = None)]
struct Cli {
    /// Path to the catalog store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Named catalog inside the store
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.log.level);

    let (store_path, catalog_name) = resolve_store_config(&config, cli.store, cli.catalog);
    tracing::debug!(catalog = %catalog_name, path = %store_path.display(), "opening catalog store");
    let store = open_store(&store_path, &catalog_name)?;

    let mut catalog = Catalog::open(store);
    let mut stdout = std::io::stdout().lock();
    commands::run(&mut catalog, cli.command, &config.admin.password, &mut stdout)?;

    Ok(())
}
