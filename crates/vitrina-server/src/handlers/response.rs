//! Response helpers for cache-tagged payloads.

use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Header que reporta si el payload vino del cache.
pub static CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

/// Where the payload of a read-through response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from the cache.
    Hit,
    /// Served from the origin.
    Miss,
}

impl CacheOutcome {
    /// Valor del header `X-Cache`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// Builds a 200 response with the payload and its `X-Cache` tag.
pub fn cache_tagged<T: Serialize>(payload: &T, outcome: CacheOutcome) -> Response {
    let mut response = (StatusCode::OK, Json(payload)).into_response();
    response.headers_mut().insert(
        CACHE_STATUS_HEADER.clone(),
        HeaderValue::from_static(outcome.as_str()),
    );
    response
}
