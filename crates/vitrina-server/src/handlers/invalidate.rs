//! Cache invalidation endpoint handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::require_admin;
use crate::cache::InvalidationScope;
use crate::error::AppError;
use crate::state::AppState;

/// Request body para POST /invalidate-cache.
#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    /// Discriminador: `products`, `collections` o `all`.
    #[serde(rename = "type")]
    pub target: String,
}

/// Response para una invalidacion completada.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub success: bool,
    /// Scope que fue invalidado, eco del request.
    pub invalidated: String,
}

/// Handler for POST /invalidate-cache.
///
/// Admin-only: the bearer token must resolve to an identity carrying the
/// admin role before the body is even parsed. Store failures surface as
/// 500 here; a purge that did not happen must not look successful.
#[instrument(skip_all)]
pub async fn invalidate_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<InvalidateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let identity = require_admin(state.catalog(), &headers).await?;

    let Json(request) = body.map_err(|_| AppError::BadRequest("Invalid request body"))?;
    let scope: InvalidationScope = request
        .target
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid invalidation type"))?;

    let outcome = state
        .cache()
        .invalidate(scope)
        .await
        .map_err(|e| AppError::internal(format!("cache invalidation failed: {e}")))?;

    tracing::info!(
        user = %identity.id,
        scope = %outcome.scope,
        removed = outcome.removed,
        "Cache invalidated by admin"
    );

    Ok(Json(InvalidateResponse {
        success: true,
        invalidated: outcome.scope.to_string(),
    })
    .into_response())
}
