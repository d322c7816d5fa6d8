//! Typed cache client for catalog payloads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::metrics::CacheMetrics;

use super::keys::CacheKey;
use super::store::{CacheError, CacheStore};

/// Configuracion del cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL en segundos (default: 300 = 5 minutos)
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

impl CacheConfig {
    /// TTL como `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Cache client used by the read-through handlers.
///
/// Payloads cross the store boundary as JSON text; this type owns the
/// serialization policy and, more importantly, the failure policy:
///
/// - a read that fails for any reason (store down, timeout, malformed
///   payload) is reported as a miss, never as an error;
/// - fills are best-effort and silently dropped on failure.
///
/// Deletions are the exception. They propagate errors, because an admin
/// purging stale data needs to know when the purge did not happen.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vitrina_server::cache::{CacheConfig, CacheKey, CatalogCache, MemoryStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = CatalogCache::new(Arc::new(MemoryStore::new()), CacheConfig::default());
/// let key = CacheKey::product("marina-azul");
///
/// if let Some(product) = cache.get::<serde_json::Value>(&key).await {
///     println!("Cache hit!");
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct CatalogCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl CatalogCache {
    /// Crea un nuevo cache client sobre el store dado.
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Reads and deserializes the payload at `key`.
    ///
    /// Returns `None` both on absence and on every failure path; the caller
    /// cannot tell those apart and is expected to fall back to the origin.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let start = Instant::now();
        let key_str = key.to_string();

        let outcome = match self.store.get(&key_str).await {
            Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
                Ok(value) => Some(value),
                Err(e) => {
                    // Payload corrupto cuenta como ausencia.
                    warn!(key = %key_str, error = %e, "Malformed cache payload, treating as miss");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key_str, error = %e, "Cache read failed, treating as miss");
                self.metrics.record_error("get");
                None
            }
        };

        if outcome.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
        self.metrics
            .record_operation_duration("get", start.elapsed());

        outcome
    }

    /// Best-effort fill. Serialization or store failures are logged and
    /// dropped; the caller's response must not depend on this write.
    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let start = Instant::now();
        let key_str = key.to_string();

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key_str, error = %e, "Failed to serialize cache payload");
                self.metrics.record_error("set");
                return;
            }
        };

        if let Err(e) = self.store.set(&key_str, &payload, self.config.ttl()).await {
            warn!(key = %key_str, error = %e, "Cache fill failed, continuing without it");
            self.metrics.record_error("set");
        }
        self.metrics
            .record_operation_duration("set", start.elapsed());
    }

    /// Removes exact keys from the store. An empty batch is a local no-op.
    ///
    /// Unlike reads and fills, failures here reach the caller.
    pub async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        let start = Instant::now();
        let result = self.store.delete(keys).await;
        if result.is_err() {
            self.metrics.record_error("delete");
        }
        self.metrics
            .record_operation_duration("delete", start.elapsed());
        result
    }

    /// Removes every key matching a glob pattern. Zero matches is a no-op.
    ///
    /// Unlike reads and fills, failures here reach the caller.
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let start = Instant::now();
        let result = self.store.delete_pattern(pattern).await;
        if result.is_err() {
            self.metrics.record_error("delete_pattern");
        }
        self.metrics
            .record_operation_duration("delete_pattern", start.elapsed());
        result
    }

    /// TTL aplicado a cada fill.
    pub fn ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}
