//! HTTP request handlers for the user service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use gisrest::{
    parse_user_id, validate_user_id, LocateQuery, NewUser, User, UserUpdate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::extract::UserBody;
use crate::AppState;

fn default_radius() -> f64 {
    LocateQuery::DEFAULT_RADIUS
}

fn default_limit() -> i64 {
    LocateQuery::DEFAULT_LIMIT
}

/// Query parameters for the proximity search.
///
/// Every parameter is optional.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocateParams {
    /// Latitude of the search center (default 0).
    #[serde(default)]
    pub lat: f64,
    /// Longitude of the search center (default 0).
    #[serde(default)]
    pub lng: f64,
    /// Search radius in units of the store's SRID (default 1).
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Maximum number of users returned (default 1). Not validated.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl From<LocateParams> for LocateQuery {
    fn from(params: LocateParams) -> Self {
        LocateQuery::new(params.lat, params.lng, params.radius, params.limit)
    }
}

/// Form body for creating or updating a user.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserForm {
    /// Latitude in decimal degrees.
    pub lat: Option<f64>,
    /// Longitude in decimal degrees.
    pub lng: Option<f64>,
    /// Display name.
    pub name: Option<String>,
}

/// Proximity search result.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    /// Matching users, in no particular order.
    pub users: Vec<User>,
}

/// Single user lookup result. `user` is null when the id does not exist.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// The user, or null.
    pub user: Option<User>,
}

/// Id assigned to a created user.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    /// Server-assigned id of the new user.
    pub user_id: i64,
}

/// Outcome of an update or delete, or the reason a request was rejected.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse {
    /// `success`, or a validation message.
    pub result: String,
}

impl ResultResponse {
    fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Storage backend in use.
    pub backend: String,
}

/// Find users near a point.
///
/// # Returns
///
/// - `200 OK` with up to `limit` users within `radius` of `(lat, lng)`
/// - `400 Bad Request` if a parameter is not a number
/// - `500 Internal Server Error` if the store rejects the query
#[utoipa::path(
    get,
    path = "/api/v1/locate",
    params(LocateParams),
    responses(
        (status = 200, description = "Users within the radius", body = UsersResponse),
        (status = 400, description = "Malformed parameter"),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn locate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocateParams>,
) -> Result<Json<UsersResponse>, ApiError> {
    tracing::debug!(
        lat = params.lat,
        lng = params.lng,
        radius = params.radius,
        limit = params.limit,
        "Locate query"
    );

    let users = state.store.locate(&params.into()).await?;
    tracing::debug!(count = users.len(), "Locate results");

    Ok(Json(UsersResponse { users }))
}

/// Fetch one user.
///
/// A non-numeric id is treated as `0`, which never exists.
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user, body is `{\"user\": null}`", body = UserResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user_id = parse_user_id(&raw_id);
    tracing::debug!(user_id, "Get user");

    let user = state.store.get_user(user_id).await?;
    let status = if user.is_some() {
        StatusCode::OK
    } else {
        tracing::debug!(user_id, "User not found");
        StatusCode::NOT_FOUND
    };

    Ok((status, Json(UserResponse { user })))
}

/// Update a user's name, location, or both.
///
/// The location changes only when both `lat` and `lng` are sent. Updating an
/// id that does not exist still reports success. The id is checked before
/// the body, so a bad id is reported even when the body is malformed.
#[utoipa::path(
    post,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Update applied", body = ResultResponse),
        (status = 400, description = "Invalid user id, update data or form body", body = ResultResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: UserBody,
) -> Result<Json<ResultResponse>, ApiError> {
    let user_id = validate_user_id(parse_user_id(&raw_id))?;
    let form = body.into_form()?;
    let update = UserUpdate::from_parts(form.name, form.lat, form.lng)?;

    state.store.update_user(user_id, &update).await?;
    tracing::info!(
        user_id,
        name_changed = update.name().is_some(),
        location_changed = update.location().is_some(),
        "User updated"
    );

    Ok(Json(ResultResponse::success()))
}

/// Create a user.
///
/// Missing fields, or a missing body, default to `lat = 0`, `lng = 0`,
/// `name = "user"`.
#[utoipa::path(
    put,
    path = "/api/v1/user",
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User created", body = CreatedResponse),
        (status = 400, description = "Malformed form body", body = ResultResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: UserBody,
) -> Result<Json<CreatedResponse>, ApiError> {
    let form = body.into_form()?;
    let user = NewUser::from_parts(form.name, form.lat, form.lng);
    let user_id = state.store.create_user(&user).await?;

    tracing::info!(
        user_id,
        lat = user.location.lat,
        lng = user.location.lng,
        "User created"
    );

    Ok(Json(CreatedResponse { user_id }))
}

/// Delete a user. Deleting an id that does not exist still reports success.
#[utoipa::path(
    delete,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ResultResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "users"
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ResultResponse>, ApiError> {
    let user_id = parse_user_id(&raw_id);
    state.store.delete_user(user_id).await?;
    tracing::info!(user_id, "User deleted");

    Ok(Json(ResultResponse::success()))
}

/// Health check endpoint.
///
/// Returns service status, version and storage backend.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "system"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend().to_string(),
    })
}
