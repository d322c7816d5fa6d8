//! Read-through catalog endpoint handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use vitrina_catalog::Product;

use crate::cache::CacheKey;
use crate::error::AppError;
use crate::handlers::response::{CacheOutcome, cache_tagged};
use crate::state::AppState;

/// Query-string input for the single-product endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub slug: Option<String>,
}

/// JSON body input for the single-product endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub slug: Option<String>,
}

/// Handler for GET/POST /cached-product.
///
/// The slug arrives via query string or JSON body, query string winning
/// when both are present. The response carries an `X-Cache` header so the
/// storefront can observe cache effectiveness.
#[instrument(skip_all)]
pub async fn cached_product(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> Result<Response, AppError> {
    // El slug se resuelve antes de tocar cache u origen; un valor vacio
    // cuenta como ausente.
    let slug = query
        .slug
        .filter(|slug| !slug.is_empty())
        .or_else(|| body.ok().and_then(|Json(body)| body.slug))
        .filter(|slug| !slug.is_empty())
        .ok_or(AppError::BadRequest("Missing slug parameter"))?;

    let key = CacheKey::product(&slug);

    if let Some(cached) = state.cache().get::<Product>(&key).await {
        tracing::debug!(slug = %slug, "Serving product from cache");
        return Ok(cache_tagged(&cached, CacheOutcome::Hit));
    }

    tracing::info!(slug = %slug, "Cache miss, querying origin");

    let product = state
        .catalog()
        .product_by_slug(&slug)
        .await
        .map_err(|e| AppError::internal(format!("origin lookup for '{slug}' failed: {e}")))?
        .ok_or(AppError::NotFound("Product not found"))?;

    // Fill best-effort: la respuesta no depende de este write.
    state.cache().put(&key, &product).await;

    Ok(cache_tagged(&product, CacheOutcome::Miss))
}

/// Handler for GET/POST /cached-products.
///
/// Serves the full publicly visible listing under a single cache entry.
#[instrument(skip_all)]
pub async fn cached_products(State(state): State<AppState>) -> Result<Response, AppError> {
    let key = CacheKey::Collection;

    if let Some(cached) = state.cache().get::<Vec<Product>>(&key).await {
        tracing::debug!(count = cached.len(), "Serving product listing from cache");
        return Ok(cache_tagged(&cached, CacheOutcome::Hit));
    }

    tracing::info!("Cache miss, querying origin for listing");

    let products = state
        .catalog()
        .published_products()
        .await
        .map_err(|e| AppError::internal(format!("origin listing failed: {e}")))?;

    state.cache().put(&key, &products).await;

    Ok(cache_tagged(&products, CacheOutcome::Miss))
}
