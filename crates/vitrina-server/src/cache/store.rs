//! Cache store abstraction.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Error del backend de cache.
///
/// Callers on the read path recover from every variant by falling back to
/// the origin; only the invalidation endpoint propagates them to clients.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The store could not be reached or the connection was lost.
    #[error("cache connection failed: {0}")]
    Connection(String),

    /// A command reached the store but failed.
    #[error("cache operation failed: {0}")]
    Operation(String),

    /// A command did not complete within its budget.
    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),

    /// The invalidation pattern could not be compiled.
    #[error("invalid cache pattern: {0}")]
    Pattern(String),
}

/// Minimal key-value contract over the remote cache store.
///
/// Payloads are opaque strings; the serialization policy lives in
/// [`CatalogCache`](crate::cache::CatalogCache). Implementations own key
/// expiry and must treat an empty key batch as a no-op rather than issuing
/// a zero-key command to the backend.
///
/// # Implementors
///
/// - [`RedisStore`](crate::cache::RedisStore) - remote store for deployments
/// - [`MemoryStore`](crate::cache::MemoryStore) - in-process store for tests
///   and local development
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the payload stored at `key`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the key is absent or already expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `payload` at `key`, overwriting any previous value, expiring
    /// after `ttl`.
    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes the given keys, returning how many actually existed.
    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError>;

    /// Removes every key matching a glob-style pattern, returning how many
    /// were removed. Zero matches is a successful no-op.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError>;
}
