//! Basic usage of the in-memory store.
//!
//! Run with: cargo run --example basic -p gisrest

use gisrest::{LocateQuery, MemoryUserStore, NewUser, UserStore, UserUpdate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryUserStore::new();

    let alice = store
        .create_user(&NewUser::from_parts(Some("alice".into()), Some(10.0), Some(20.0)))
        .await?;
    let bob = store
        .create_user(&NewUser::from_parts(Some("bob".into()), Some(10.5), Some(20.5)))
        .await?;
    println!("Created users {} and {}", alice, bob);

    let query = LocateQuery::new(10.0, 20.0, 1.0, 10);
    for user in store.locate(&query).await? {
        println!(
            "  {} ({}) at lat={}, lng={}",
            user.name, user.user_id, user.lat, user.lng
        );
    }

    store
        .update_user(bob, &UserUpdate::from_parts(None, Some(50.0), Some(50.0))?)
        .await?;
    println!(
        "After moving bob: {} user(s) near alice",
        store.locate(&query).await?.len()
    );

    Ok(())
}
