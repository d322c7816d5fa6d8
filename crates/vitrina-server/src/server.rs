use std::net::SocketAddr;

use axum::{Router, middleware, routing::get, routing::post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;

use crate::handlers::{
    health::health_check,
    invalidate::invalidate_cache,
    metrics::metrics_handler,
    products::{cached_product, cached_products},
};
use crate::middleware::{CorsConfig, CorsLayer, LoggingLayer, RequestIdLayer};
use crate::state::AppState;

/// Creates a router with the given application state and metrics handle.
pub fn create_router_with_state(
    state: AppState,
    cors: CorsConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(LoggingLayer)
        .layer(CorsLayer::new(cors));

    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Main application router. Los endpoints de lectura aceptan GET y POST
    // porque el slug puede venir por query string o por body JSON.
    let app_router = Router::new()
        .route("/health", get(health_check))
        .route("/cached-product", get(cached_product).post(cached_product))
        .route(
            "/cached-products",
            get(cached_products).post(cached_products),
        )
        .route("/invalidate-cache", post(invalidate_cache))
        .with_state(state);

    // Merge routers and apply middleware. CORS queda dentro del stack:
    // los preflights se loguean pero no cuentan como trafico HTTP en metrics.
    Router::new()
        .merge(app_router)
        .merge(metrics_router)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(middleware_stack)
}

/// Runs the server with the given state and metrics handle.
pub async fn run_server_with_state(
    addr: SocketAddr,
    state: AppState,
    cors: CorsConfig,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router_with_state(state, cors, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
