//! Redis-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::debug;

use super::store::{CacheError, CacheStore};

/// Connection settings for [`RedisStore`].
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Connection string, e.g. `redis://localhost:6379`.
    pub url: String,
    /// Budget for establishing the initial connection.
    pub connect_timeout: Duration,
    /// Budget for a single command round trip.
    pub operation_timeout: Duration,
}

impl RedisConfig {
    /// Crea la configuracion con los timeouts por defecto.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(2),
        }
    }
}

/// Cache store over a remote Redis-compatible server.
///
/// A single managed connection is shared by all requests and established
/// lazily on first use; the manager reconnects on its own after network
/// failures. Every command runs under `operation_timeout` so a stuck store
/// turns into an error the caller can degrade on, never a stalled request.
pub struct RedisStore {
    client: Client,
    manager: OnceCell<ConnectionManager>,
    config: RedisConfig,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `ConnectionManager` has no `Debug` impl, so the handle is elided.
        f.debug_struct("RedisStore")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Creates a store for the given connection settings.
    ///
    /// Only the URL is validated here; the first network round trip happens
    /// on the first operation.
    pub fn connect(config: RedisConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            manager: OnceCell::new(),
            config,
        })
    }

    /// Scoped acquisition: a cloned handle over the shared connection,
    /// valid for one operation.
    async fn conn(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                debug!(url = %self.config.url, "Establishing cache store connection");
                timeout(self.config.connect_timeout, self.client.get_connection_manager())
                    .await
                    .map_err(|_| CacheError::Timeout(self.config.connect_timeout))?
                    .map_err(|e| CacheError::Connection(e.to_string()))
            })
            .await?;
        Ok(manager.clone())
    }

    /// Round trip de verificacion, usado al arranque.
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let _: String = timeout(self.config.operation_timeout, async {
            redis::cmd("PING").query_async(&mut conn).await
        })
        .await
        .map_err(|_| self.timed_out())?
        .map_err(op_err)?;
        Ok(())
    }

    fn timed_out(&self) -> CacheError {
        CacheError::Timeout(self.config.operation_timeout)
    }
}

fn op_err(e: redis::RedisError) -> CacheError {
    CacheError::Operation(e.to_string())
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = timeout(self.config.operation_timeout, conn.get(key))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(op_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError> {
        // SETEX rechaza 0 segundos.
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.conn().await?;
        let _: () = timeout(
            self.config.operation_timeout,
            conn.set_ex(key, payload, seconds),
        )
        .await
        .map_err(|_| self.timed_out())?
        .map_err(op_err)?;
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        // Un DEL sin keys es un error de protocolo.
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn().await?;
        let removed: u64 = timeout(self.config.operation_timeout, conn.del(keys.to_vec()))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(op_err)?;
        Ok(removed)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut conn = self.conn().await?;

        // La keyspace son dos namespaces pequenos; KEYS es suficiente aqui.
        let matched: Vec<String> = timeout(self.config.operation_timeout, conn.keys(pattern))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(op_err)?;

        if matched.is_empty() {
            debug!(pattern = %pattern, "No cache keys matched pattern");
            return Ok(0);
        }

        let removed: u64 = timeout(self.config.operation_timeout, conn.del(matched))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(op_err)?;
        Ok(removed)
    }
}
