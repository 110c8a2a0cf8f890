//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input gets the JSON error body
//! instead of Axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{TodoId, ValidationError};

/// Extract and validate a todo id from path
pub struct ValidTodoId(pub i32);

impl<S> FromRequestParts<S> for ValidTodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unprocessable(ValidationError::Empty { field: "id" }))?;

        let id = TodoId::parse(&raw)?;
        Ok(Self(id.get()))
    }
}

/// JSON body whose every rejection (syntax, types, content type) is a 400
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                reason: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
