//! In-process user store.
//!
//! [`MemoryUserStore`] follows the same contract as the PostGIS store: planar
//! distance in coordinate units, no result ordering guarantees, and silent
//! success for updates and deletes of missing ids.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{GisError, Result};
use crate::point::{GeoPoint, DEFAULT_SRID};
use crate::store::UserStore;
use crate::user::{LocateQuery, NewUser, User, UserUpdate};

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    location: GeoPoint,
}

impl StoredUser {
    fn to_user(&self, user_id: i64) -> User {
        User {
            user_id,
            name: self.name.clone(),
            lat: self.location.lat,
            lng: self.location.lng,
        }
    }
}

/// A user store kept entirely in memory.
///
/// Ids are assigned from a sequence starting at 1 and never reused.
#[derive(Debug)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<i64, StoredUser>>,
    next_id: AtomicI64,
    srid: i32,
}

impl MemoryUserStore {
    /// Create an empty store in [`DEFAULT_SRID`].
    pub fn new() -> Self {
        Self::with_srid(DEFAULT_SRID)
    }

    /// Create an empty store that reports the given SRID.
    pub fn with_srid(srid: i32) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            srid,
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn locate(&self, query: &LocateQuery) -> Result<Vec<User>> {
        // Same failure PostgreSQL reports for `LIMIT -1`
        if query.limit < 0 {
            return Err(GisError::Query("LIMIT must not be negative".to_string()));
        }

        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|(_, stored)| stored.location.within(&query.center, query.radius))
            .take(query.limit as usize)
            .map(|(id, stored)| stored.to_user(*id))
            .collect())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).map(|stored| stored.to_user(user_id)))
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let user_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.users.write().await.insert(
            user_id,
            StoredUser {
                name: user.name.clone(),
                location: user.location,
            },
        );
        Ok(user_id)
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.get_mut(&user_id) {
            if let Some(name) = update.name() {
                stored.name = name.to_string();
            }
            if let Some(location) = update.location() {
                stored.location = location;
            }
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.users.write().await.remove(&user_id);
        Ok(())
    }

    fn srid(&self) -> i32 {
        self.srid
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, lat: f64, lng: f64) -> NewUser {
        NewUser::from_parts(Some(name.to_string()), Some(lat), Some(lng))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryUserStore::new();
        let id = store.create_user(&new_user("x", 1.0, 2.0)).await.unwrap();
        assert_eq!(id, 1);

        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.name, "x");
        assert_eq!(user.lat, 1.0);
        assert_eq!(user.lng, 2.0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryUserStore::new();
        let first = store.create_user(&NewUser::default()).await.unwrap();
        store.delete_user(first).await.unwrap();
        let second = store.create_user(&NewUser::default()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryUserStore::new();
        assert!(store.get_user(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_locate_radius_and_limit() {
        let store = MemoryUserStore::new();
        store.create_user(&new_user("near", 0.5, 0.5)).await.unwrap();
        store.create_user(&new_user("edge", 0.0, 1.0)).await.unwrap();
        store.create_user(&new_user("far", 5.0, 5.0)).await.unwrap();

        let query = LocateQuery::new(0.0, 0.0, 1.0, 10);
        let mut names: Vec<_> = store
            .locate(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["edge", "near"]);

        let query = LocateQuery::new(0.0, 0.0, 1.0, 1);
        assert_eq!(store.locate(&query).await.unwrap().len(), 1);

        let query = LocateQuery::new(0.0, 0.0, 1.0, 0);
        assert!(store.locate(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locate_negative_limit() {
        let store = MemoryUserStore::new();
        let query = LocateQuery::new(0.0, 0.0, 1.0, -1);
        assert!(matches!(store.locate(&query).await, Err(GisError::Query(_))));
    }

    #[tokio::test]
    async fn test_partial_updates() {
        let store = MemoryUserStore::new();
        let id = store.create_user(&new_user("erin", 1.0, 1.0)).await.unwrap();

        let update = UserUpdate::from_parts(Some("frank".to_string()), None, None).unwrap();
        store.update_user(id, &update).await.unwrap();
        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.name, "frank");
        assert_eq!(user.location(), GeoPoint::new(1.0, 1.0));

        let update = UserUpdate::from_parts(None, Some(3.0), Some(4.0)).unwrap();
        store.update_user(id, &update).await.unwrap();
        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.name, "frank");
        assert_eq!(user.location(), GeoPoint::new(3.0, 4.0));
    }

    #[tokio::test]
    async fn test_missing_ids_succeed_silently() {
        let store = MemoryUserStore::new();
        let update = UserUpdate::from_parts(Some("ghost".to_string()), None, None).unwrap();
        store.update_user(42, &update).await.unwrap();
        store.delete_user(42).await.unwrap();
        assert!(store.is_empty().await);
    }
}
