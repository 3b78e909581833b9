//! Mapping of library errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gisrest::GisError;

use crate::handlers::{ErrorResponse, ResultResponse};

/// Error returned by the user handlers.
///
/// Validation failures keep the `{"result": "<message>"}` body clients
/// already parse; store failures become a 500 with an `error` field.
#[derive(Debug)]
pub struct ApiError(pub GisError);

impl From<GisError> for ApiError {
    fn from(err: GisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_validation() {
            tracing::warn!(error = %self.0, "Rejected request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ResultResponse {
                    result: self.0.to_string(),
                }),
            )
                .into_response();
        }

        tracing::error!(error = %self.0, "User store error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
