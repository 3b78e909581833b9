use anyhow::{bail, Context, Result};
use gisrest::{validate_user_id, NewUser, UserStore, UserUpdate};
use serde::Serialize;

use super::format_user;

#[derive(Serialize)]
struct UserResponse {
    user: Option<gisrest::User>,
}

pub async fn get(store: &dyn UserStore, user_id: i64, json: bool) -> Result<()> {
    let user = store
        .get_user(user_id)
        .await
        .with_context(|| format!("Failed to fetch user {}", user_id))?;

    if json {
        println!("{}", serde_json::to_string(&UserResponse { user })?);
        return Ok(());
    }

    match user {
        Some(user) => println!("{}", format_user(&user)),
        None => bail!("User {} not found", user_id),
    }
    Ok(())
}

pub async fn create(
    store: &dyn UserStore,
    lat: Option<f64>,
    lng: Option<f64>,
    name: Option<String>,
) -> Result<()> {
    let user = NewUser::from_parts(name, lat, lng);
    let user_id = store
        .create_user(&user)
        .await
        .context("Failed to create user")?;

    println!("{}", user_id);
    Ok(())
}

pub async fn update(
    store: &dyn UserStore,
    user_id: i64,
    lat: Option<f64>,
    lng: Option<f64>,
    name: Option<String>,
) -> Result<()> {
    let user_id = validate_user_id(user_id)?;
    let update = UserUpdate::from_parts(name, lat, lng)
        .context("Nothing to update: pass --name and/or both --lat and --lng")?;

    store
        .update_user(user_id, &update)
        .await
        .with_context(|| format!("Failed to update user {}", user_id))?;

    println!("success");
    Ok(())
}

pub async fn delete(store: &dyn UserStore, user_id: i64) -> Result<()> {
    store
        .delete_user(user_id)
        .await
        .with_context(|| format!("Failed to delete user {}", user_id))?;

    println!("success");
    Ok(())
}
