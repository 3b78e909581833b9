//! OpenAPI documentation for the user service.

use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI document served under `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "gisrest User Service",
        version = "0.1.0",
        description = "Users with geographic locations: proximity search and user management.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::locate,
        handlers::get_user,
        handlers::update_user,
        handlers::create_user,
        handlers::delete_user,
        handlers::health_check,
    ),
    components(
        schemas(
            gisrest::User,
            handlers::UserForm,
            handlers::UsersResponse,
            handlers::UserResponse,
            handlers::CreatedResponse,
            handlers::ResultResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "users", description = "Proximity search and user management"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;
