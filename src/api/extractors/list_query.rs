//! List query-string extractor (`offset`, `limit`, `search`).

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::errors::AppError;
use crate::types::{ListParams, ListQueryParams};

/// Normalized list parameters read from the query string.
#[derive(Debug, Clone)]
pub struct ListQuery(pub ListParams);

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<ListQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(ListQuery(raw.into_params()?))
    }
}
