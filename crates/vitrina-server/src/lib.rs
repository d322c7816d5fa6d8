//! Vitrina Server - HTTP cache layer for the Vitrina catalog
//!
//! Axum-based server that sits between the storefront and its catalog
//! origin, answering product reads from Redis with read-through fills
//! and exposing an admin endpoint to invalidate cached entries.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::{AppConfig, ConfigError, RuntimeEnv};
pub use server::{create_router_with_state, run_server_with_state};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
