// src/api/extract.rs

use crate::api::error::ApiError;
use crate::core::error::TargetError;
use crate::core::target::Target;
use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use tracing::warn;

/// Query string shared by every check: `?url=<url or hostname>`.
#[derive(Debug, Deserialize)]
struct TargetQuery {
    url: Option<String>,
}

/// The validated `url` parameter.
///
/// Rejects with an [`ApiError`], so a malformed query string gets the same
/// `{"error": …}` body as any other failure.
#[derive(Debug)]
pub struct TargetParam(pub Target);

#[async_trait]
impl<S> FromRequestParts<S> for TargetParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<TargetQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection, "Unreadable query string");
                TargetError::Invalid
            })?;
        Ok(Self(Target::from_param(query.url.as_deref())?))
    }
}
