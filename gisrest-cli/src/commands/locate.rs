use anyhow::{Context, Result};
use gisrest::{LocateQuery, UserStore};
use serde::Serialize;

use super::format_user;

#[derive(Serialize)]
struct LocateResponse {
    users: Vec<gisrest::User>,
}

pub async fn run(
    store: &dyn UserStore,
    lat: f64,
    lng: f64,
    radius: f64,
    limit: i64,
    json: bool,
) -> Result<()> {
    let query = LocateQuery::new(lat, lng, radius, limit);
    let users = store
        .locate(&query)
        .await
        .context("Failed to locate users")?;

    if json {
        println!("{}", serde_json::to_string(&LocateResponse { users })?);
    } else if users.is_empty() {
        eprintln!("No users within {} of ({}, {})", radius, lat, lng);
    } else {
        for user in &users {
            println!("{}", format_user(user));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gisrest::{MemoryUserStore, NewUser};

    #[tokio::test]
    async fn test_run_against_memory_store() {
        let store = MemoryUserStore::new();
        store
            .create_user(&NewUser::from_parts(Some("a".into()), Some(1.0), Some(1.0)))
            .await
            .unwrap();

        run(&store, 1.0, 1.0, 1.0, 10, true).await.unwrap();
        run(&store, 1.0, 1.0, 1.0, 10, false).await.unwrap();
        assert!(run(&store, 1.0, 1.0, 1.0, -1, false).await.is_err());
    }
}
