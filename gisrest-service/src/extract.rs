//! Request body extraction for the user form.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form,
};
use gisrest::GisError;
use std::convert::Infallible;

use crate::handlers::UserForm;

/// Form body of a create or update request.
///
/// A request without a body is an empty form, so every field takes its
/// default. A body that cannot be decoded is kept as an error and reported
/// by the handler once the path has been validated.
#[derive(Debug)]
pub struct UserBody(pub Result<UserForm, GisError>);

impl UserBody {
    /// The decoded form, or the reason it could not be decoded.
    pub fn into_form(self) -> Result<UserForm, GisError> {
        self.0
    }
}

#[async_trait]
impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_bodyless(&req) {
            return Ok(Self(Ok(UserForm::default())));
        }

        let form = Form::<UserForm>::from_request(req, state)
            .await
            .map(|Form(form)| form)
            .map_err(|rejection| GisError::InvalidForm(rejection.body_text()));

        Ok(Self(form))
    }
}

/// No content type and no declared length.
fn is_bodyless(req: &Request) -> bool {
    let headers = req.headers();
    let empty_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map_or(true, |v| v.trim() == "0");

    !headers.contains_key(header::CONTENT_TYPE) && empty_length
}
