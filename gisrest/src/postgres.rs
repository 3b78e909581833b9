//! PostGIS-backed user store.
//!
//! All spatial work happens in the database: points are built with
//! `ST_MakePoint`, tagged with the configured SRID and compared with
//! `ST_DWithin`. Each operation checks out one pooled connection for a single
//! autocommit statement.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StoreConfig;
use crate::error::{GisError, Result};
use crate::store::UserStore;
use crate::user::{LocateQuery, NewUser, User, UserUpdate};

const LOCATE_SQL: &str = "\
    SELECT id AS user_id, name, ST_Y(location) AS lat, ST_X(location) AS lng \
    FROM users \
    WHERE ST_DWithin(location, ST_SetSRID(ST_MakePoint($1, $2), $3), $4) \
    LIMIT $5";

const GET_SQL: &str = "\
    SELECT id AS user_id, name, ST_Y(location) AS lat, ST_X(location) AS lng \
    FROM users WHERE id = $1";

const CREATE_SQL: &str = "\
    INSERT INTO users (name, location) \
    VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), $4)) \
    RETURNING id";

const UPDATE_NAME_SQL: &str = "UPDATE users SET name = $2 WHERE id = $1";

const UPDATE_LOCATION_SQL: &str = "\
    UPDATE users SET location = ST_SetSRID(ST_MakePoint($2, $3), $4) WHERE id = $1";

const UPDATE_BOTH_SQL: &str = "\
    UPDATE users SET name = $2, location = ST_SetSRID(ST_MakePoint($3, $4), $5) WHERE id = $1";

const DELETE_SQL: &str = "DELETE FROM users WHERE id = $1";

/// User store over a shared PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
    srid: i32,
}

impl PgUserStore {
    /// Open the connection pool described by `config`.
    ///
    /// Connects eagerly so a bad URL fails at startup rather than on the
    /// first request.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::debug!(
            max_connections = config.max_connections,
            srid = config.srid,
            "PostgreSQL pool ready"
        );

        Ok(Self::from_pool(pool, config.srid))
    }

    fn from_pool(pool: PgPool, srid: i32) -> Self {
        Self { pool, srid }
    }

    /// Create the PostGIS extension and the `users` table if missing.
    pub async fn run_migrations(&self) -> Result<()> {
        let statements = [
            "CREATE EXTENSION IF NOT EXISTS postgis".to_string(),
            format!(
                "CREATE TABLE IF NOT EXISTS users (\
                     id BIGSERIAL PRIMARY KEY, \
                     name TEXT NOT NULL, \
                     location geometry(Point, {}) NOT NULL)",
                self.srid
            ),
        ];

        for statement in &statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| GisError::Migration(e.to_string()))?;
        }

        tracing::info!(srid = self.srid, "Schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn locate(&self, query: &LocateQuery) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(LOCATE_SQL)
            .bind(query.center.lng)
            .bind(query.center.lat)
            .bind(self.srid)
            .bind(query.radius)
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(GET_SQL)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let user_id = sqlx::query_scalar::<_, i64>(CREATE_SQL)
            .bind(&user.name)
            .bind(user.location.lng)
            .bind(user.location.lat)
            .bind(self.srid)
            .fetch_one(&self.pool)
            .await?;
        Ok(user_id)
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<()> {
        let query = match (update.name(), update.location()) {
            (Some(name), Some(location)) => sqlx::query(UPDATE_BOTH_SQL)
                .bind(user_id)
                .bind(name)
                .bind(location.lng)
                .bind(location.lat)
                .bind(self.srid),
            (Some(name), None) => sqlx::query(UPDATE_NAME_SQL).bind(user_id).bind(name),
            (None, Some(location)) => sqlx::query(UPDATE_LOCATION_SQL)
                .bind(user_id)
                .bind(location.lng)
                .bind(location.lat)
                .bind(self.srid),
            (None, None) => return Err(GisError::InvalidUpdateData),
        };

        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<()> {
        sqlx::query(DELETE_SQL)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn srid(&self) -> i32 {
        self.srid
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
