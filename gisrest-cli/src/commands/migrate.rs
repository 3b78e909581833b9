use anyhow::{bail, Context, Result};
use gisrest::{open_store, StoreConfig};

pub async fn run(config: &StoreConfig) -> Result<()> {
    if config.is_memory() {
        bail!("The in-memory store has no schema to migrate");
    }

    open_store(&config.clone().migrate(true))
        .await
        .with_context(|| format!("Failed to create schema at {}", config.database_url))?;

    println!("Schema ready (SRID {})", config.srid);
    Ok(())
}
