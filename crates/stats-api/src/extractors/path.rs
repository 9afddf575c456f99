//! Path parameter extractors
//!
//! Type-safe extraction of periods from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use stats_core::Period;

use crate::response::ApiError;

/// A `YYYY-MM` period taken from the single path parameter
#[derive(Debug, Clone, Copy)]
pub struct PeriodPath(pub Period);

#[async_trait]
impl<S> FromRequestParts<S> for PeriodPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(PeriodPath(Period::parse(&raw)?))
    }
}
