//! Status-code compatibility with clients of the original API.
//!
//! The original service answered every handled request with `200 OK` and
//! signalled problems only in the body. When compatibility mode is on, this
//! middleware turns the 400/404 answers produced by the user handlers back
//! into 200 while leaving the JSON body untouched.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// Rewrite handler-generated 400 and 404 JSON responses to 200.
///
/// Extractor rejections and unmatched routes are not JSON and keep their status.
pub async fn restore_ok_status(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    if matches!(
        response.status(),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND
    ) && is_json(&response)
    {
        *response.status_mut() = StatusCode::OK;
    }

    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
