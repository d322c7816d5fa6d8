//! Vitrina Cache Server binary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vitrina_catalog::{RestBackend, RestBackendConfig};
use vitrina_server::cache::{CacheConfig, CatalogCache, RedisConfig, RedisStore};
use vitrina_server::metrics::init_metrics;
use vitrina_server::middleware::CorsConfig;
use vitrina_server::{AppConfig, AppState, run_server_with_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration before touching the network
    let config = AppConfig::from_env().context("invalid server configuration")?;
    let addr = config.bind_addr().context("invalid bind address")?;

    tracing::info!(
        "Starting Vitrina Cache Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Origin: {}", config.origin_url);
    tracing::info!("Environment: {:?}", config.environment);
    tracing::info!("Cache TTL: {}s", config.cache_ttl_seconds);

    // Catalog origin client
    let rest_config = RestBackendConfig::new(&config.origin_url, &config.origin_service_key)
        .context("invalid origin configuration")?;
    let backend = RestBackend::new(rest_config).context("failed to build origin client")?;

    // Cache store. Una caida de Redis no impide arrancar: el servidor
    // sirve en modo degradado (todo miss) hasta que el store vuelva.
    let store =
        RedisStore::connect(RedisConfig::new(&config.redis_url)).context("invalid REDIS_URL")?;
    match store.ping().await {
        Ok(()) => tracing::info!("Cache store reachable"),
        Err(e) => tracing::warn!(
            "Cache store unreachable at startup, serving degraded: {}",
            e
        ),
    }

    let cache = CatalogCache::new(
        Arc::new(store),
        CacheConfig {
            ttl_seconds: config.cache_ttl_seconds,
        },
    );

    // Initialize metrics recorder
    let prometheus_handle = init_metrics();

    let cors = CorsConfig::for_environment(config.environment);
    let state = AppState::from_rest_backend(backend, cache);

    // Run server
    run_server_with_state(addr, state, cors, prometheus_handle).await?;

    Ok(())
}
