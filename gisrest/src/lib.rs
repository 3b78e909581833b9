//! # gisrest - users with locations
//!
//! Data model, validation rules and storage for a small geospatial user
//! service: users have a name and a point, and can be looked up by distance
//! from another point.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gisrest::{LocateQuery, MemoryUserStore, NewUser, UserStore};
//!
//! let store = MemoryUserStore::new();
//! let id = store
//!     .create_user(&NewUser::from_parts(Some("alice".into()), Some(10.0), Some(20.0)))
//!     .await?;
//!
//! let nearby = store.locate(&LocateQuery::new(10.0, 20.0, 1.0, 10)).await?;
//! assert_eq!(nearby[0].user_id, id);
//! ```
//!
//! ## Stores
//!
//! - [`MemoryUserStore`]: process-local, for tests and demos
//! - [`PgUserStore`]: PostgreSQL with PostGIS (`postgres` feature, on by default)
//!
//! Distances follow PostGIS `geometry` semantics: they are planar and
//! measured in the units of the configured SRID (degrees for 4326).

pub mod config;
pub mod error;
pub mod memory;
pub mod point;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod store;
pub mod user;

// Re-export main types at crate root for convenience
pub use config::StoreConfig;
pub use error::{GisError, Result};
pub use memory::MemoryUserStore;
pub use point::{GeoPoint, DEFAULT_SRID};
#[cfg(feature = "postgres")]
pub use postgres::PgUserStore;
pub use store::{open_store, UserStore};
pub use user::{
    parse_user_id, validate_user_id, LocateQuery, NewUser, User, UserUpdate, DEFAULT_USER_NAME,
};
