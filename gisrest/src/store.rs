//! The storage seam shared by the HTTP service and the CLI.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
#[cfg(not(feature = "postgres"))]
use crate::error::GisError;
use crate::error::Result;
use crate::memory::MemoryUserStore;
use crate::user::{LocateQuery, NewUser, User, UserUpdate};

/// Persistent collection of users with proximity search.
///
/// Implementations hold their own connection resources and are shared by
/// reference across concurrent requests. None of the operations report
/// whether a row was affected: updating or deleting a missing user succeeds.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Users within `query.radius` of `query.center`, at most `query.limit`.
    ///
    /// No ordering is imposed on the result.
    async fn locate(&self, query: &LocateQuery) -> Result<Vec<User>>;

    /// Fetch one user by id.
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    /// Insert a user and return the assigned id.
    async fn create_user(&self, user: &NewUser) -> Result<i64>;

    /// Apply a partial update to the user with `user_id`.
    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<()>;

    /// Remove the user with `user_id`.
    async fn delete_user(&self, user_id: i64) -> Result<()>;

    /// Spatial reference id the store keeps locations in.
    fn srid(&self) -> i32;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Open the store selected by `config`.
///
/// `memory` selects [`MemoryUserStore`](crate::MemoryUserStore); anything
/// else is treated as a PostgreSQL URL and needs the `postgres` feature.
/// With `config.migrate` set, the schema is created before the store is
/// returned. The in-memory store has no schema and ignores the flag.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn UserStore>> {
    if config.is_memory() {
        tracing::warn!("Using in-memory user store, data will not survive a restart");
        return Ok(Arc::new(MemoryUserStore::with_srid(config.srid)));
    }

    connect_database(config).await
}

#[cfg(feature = "postgres")]
async fn connect_database(config: &StoreConfig) -> Result<Arc<dyn UserStore>> {
    let store = crate::postgres::PgUserStore::connect(config).await?;
    if config.migrate {
        store.run_migrations().await?;
    }
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn connect_database(config: &StoreConfig) -> Result<Arc<dyn UserStore>> {
    Err(GisError::Config(format!(
        "cannot open {}: built without the `postgres` feature",
        config.database_url
    )))
}
