pub mod locate;
pub mod migrate;
pub mod user;

use std::sync::Arc;

use anyhow::{Context, Result};
use gisrest::{open_store, StoreConfig, User, UserStore};

/// Pool size for one-shot commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

pub fn store_config(database_url: String, srid: i32) -> StoreConfig {
    StoreConfig::new(database_url)
        .srid(srid)
        .max_connections(CLI_MAX_CONNECTIONS)
}

pub async fn open(config: &StoreConfig) -> Result<Arc<dyn UserStore>> {
    open_store(config)
        .await
        .with_context(|| format!("Failed to open user store at {}", config.database_url))
}

/// One line per user: `<id>\t<name>\t<lat>\t<lng>`.
pub fn format_user(user: &User) -> String {
    format!("{}\t{}\t{}\t{}", user.user_id, user.name, user.lat, user.lng)
}
