//! gisrest Service Library
//!
//! HTTP handlers, routing and API documentation for the user service.
//! This library is used by both the gisrest-service binary and integration tests.

pub mod compat;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use gisrest::UserStore;

/// Path prefix of the user API.
pub const API_PREFIX: &str = "/api/v1";

/// Application state shared across handlers.
pub struct AppState {
    /// Store holding the users, created once at startup.
    pub store: Arc<dyn UserStore>,
    /// Answer validation and not-found cases with 200 like the original API.
    pub compat_status: bool,
}

impl AppState {
    /// Create state around a store, with standard status codes.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            compat_status: false,
        }
    }

    /// Enable or disable status-code compatibility mode.
    pub fn with_compat_status(mut self, enabled: bool) -> Self {
        self.compat_status = enabled;
        self
    }
}

/// Build the API router: user routes under [`API_PREFIX`] plus `/health`.
pub fn router(state: Arc<AppState>) -> Router {
    let mut api = Router::new()
        .route("/locate", get(handlers::locate))
        .route("/user", put(handlers::create_user))
        .route(
            "/user/:user_id",
            get(handlers::get_user)
                .post(handlers::update_user)
                .delete(handlers::delete_user),
        );

    if state.compat_status {
        api = api.layer(middleware::from_fn(compat::restore_ok_status));
    }

    Router::new()
        .nest(API_PREFIX, api)
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use docs::ApiDoc;
pub use error::ApiError;
pub use extract::UserBody;
pub use handlers::{
    CreatedResponse, ErrorResponse, HealthResponse, LocateParams, ResultResponse, UserForm,
    UserResponse, UsersResponse,
};
