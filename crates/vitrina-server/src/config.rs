//! Server configuration loaded from the environment.

use std::net::SocketAddr;

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Host por defecto.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Puerto por defecto.
pub const DEFAULT_PORT: u16 = 8787;
/// TTL por defecto para entradas de cache (5 minutos).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but unusable.
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    /// The environment could not be read or deserialized.
    #[error("failed to read environment: {0}")]
    Source(#[from] config::ConfigError),
}

/// Deployment environment.
///
/// Anything other than `production` counts as development and widens the
/// CORS allowlist with local origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Production,
    #[default]
    Development,
}

impl RuntimeEnv {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Snapshot crudo del entorno, antes de validar.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    redis_url: Option<String>,
    origin_url: Option<String>,
    origin_service_key: Option<String>,
    environment: Option<String>,
    vitrina_host: Option<String>,
    vitrina_port: Option<u16>,
    cache_ttl_seconds: Option<u64>,
}

/// Validated application configuration.
///
/// Required values are checked eagerly so a misconfigured deployment fails
/// at startup instead of on the first request that needs them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the cache store (`REDIS_URL`).
    pub redis_url: String,
    /// Base URL of the origin store (`ORIGIN_URL`).
    pub origin_url: String,
    /// Service credential for origin reads (`ORIGIN_SERVICE_KEY`).
    pub origin_service_key: String,
    /// Deployment environment (`ENVIRONMENT`).
    pub environment: RuntimeEnv,
    /// Bind host (`VITRINA_HOST`).
    pub host: String,
    /// Bind port (`VITRINA_PORT`).
    pub port: u16,
    /// TTL for cache fills in seconds (`CACHE_TTL_SECONDS`).
    pub cache_ttl_seconds: u64,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default().try_parsing(true))
    }

    /// Loads configuration from an explicit environment source.
    ///
    /// Used by tests to avoid touching the process environment.
    pub fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let redis_url = required(raw.redis_url, "REDIS_URL")?;
        let origin_url = required(raw.origin_url, "ORIGIN_URL")?;
        let origin_service_key = required(raw.origin_service_key, "ORIGIN_SERVICE_KEY")?;

        let cache_ttl_seconds = raw.cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS);
        if cache_ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                name: "CACHE_TTL_SECONDS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            redis_url,
            origin_url,
            origin_service_key,
            environment: RuntimeEnv::from_value(raw.environment.as_deref()),
            host: raw
                .vitrina_host
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: raw.vitrina_port.unwrap_or(DEFAULT_PORT),
            cache_ttl_seconds,
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: "VITRINA_HOST",
                reason: format!("{e}"),
            })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}
