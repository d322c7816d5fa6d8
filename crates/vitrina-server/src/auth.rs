//! Admin authentication for the invalidation endpoint.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use tracing::debug;
use vitrina_catalog::{CatalogSource, UserIdentity};

use crate::error::AppError;

/// Walks the credential ladder for an administrative request.
///
/// The three failure modes stay distinguishable for the caller: no
/// credential and an unverifiable credential are both 401 with different
/// messages, while a verified identity without the admin role is 403. The
/// role is only looked up after the token verifies.
pub async fn require_admin(
    catalog: &dyn CatalogSource,
    headers: &HeaderMap,
) -> Result<UserIdentity, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized("Authentication required"))?;

    let identity = match catalog.verify_token(token).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return Err(AppError::Unauthorized("Invalid token")),
        Err(e) => return Err(AppError::internal(format!("token verification failed: {e}"))),
    };

    match catalog.user_role(identity.id).await {
        Ok(Some(role)) if role.is_admin() => {
            debug!(user = %identity.id, "Admin verified");
            Ok(identity)
        }
        Ok(_) => Err(AppError::Forbidden("Admin access required")),
        Err(e) => Err(AppError::internal(format!("role lookup failed: {e}"))),
    }
}

/// Extracts the credential from the `Authorization` header.
///
/// Any present header counts as a presented credential: the `Bearer `
/// prefix is stripped when there, and whatever remains goes to the origin
/// for verification. Only an absent (or non-UTF8) header means no
/// credential.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|raw| raw.strip_prefix("Bearer ").unwrap_or(raw).trim())
}
