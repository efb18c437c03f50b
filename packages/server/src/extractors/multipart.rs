use axum::extract::{DefaultBodyLimit, FromRequest, Request};
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};

use crate::error::AppError;

/// A `TypedMultipart<T>` wrapper that reports malformed forms as
/// `AppError::Validation` instead of a plain-text rejection.
pub struct AppMultipart<T>(pub T);

impl<S, T> FromRequest<S> for AppMultipart<T>
where
    TypedMultipart<T>: FromRequest<S, Rejection = TypedMultipartError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let TypedMultipart(value) = TypedMultipart::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(AppMultipart(value))
    }
}

/// Body limit for routes that accept an image: the 10 MiB file plus form
/// fields and multipart framing.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(12 * 1024 * 1024)
}
