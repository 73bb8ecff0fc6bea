//! UUID path parameter extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::errors::AppError;

/// Row id taken from the `:id` path segment.
///
/// A segment that is not a UUID is a 400, not axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected path id: {}", e.body_text());
                AppError::validation("invalid id")
            })?;

        Ok(IdPath(id))
    }
}
