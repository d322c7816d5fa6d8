//! CORS middleware para el contrato de preflight del storefront.
//!
//! No usa una policy generica: el browser debe recibir el origen de la
//! request cuando esta en la allowlist, y el origen canonico de produccion
//! cuando no lo esta. Las requests OPTIONS se responden aqui mismo, sin
//! llegar a los handlers.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode, header},
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::config::RuntimeEnv;

/// Origenes permitidos en todos los entornos.
const PRODUCTION_ORIGINS: &[&str] = &["https://vitrina.art", "https://www.vitrina.art"];

/// Origenes extra permitidos fuera de produccion.
const DEVELOPMENT_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
];

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Resolved CORS policy for the running environment.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    allowed: Vec<String>,
    default_origin: String,
}

impl CorsConfig {
    /// Builds the policy for an environment. Non-production deployments
    /// also accept local development origins.
    pub fn for_environment(env: RuntimeEnv) -> Self {
        let mut allowed: Vec<String> = PRODUCTION_ORIGINS.iter().map(|s| s.to_string()).collect();
        if !env.is_production() {
            allowed.extend(DEVELOPMENT_ORIGINS.iter().map(|s| s.to_string()));
        }

        Self {
            default_origin: PRODUCTION_ORIGINS[0].to_string(),
            allowed,
        }
    }

    /// `Access-Control-Allow-Origin` value for a request: the request's
    /// origin when allowlisted, the canonical production origin otherwise.
    fn resolve(&self, request_origin: Option<&str>) -> &str {
        request_origin
            .and_then(|origin| self.allowed.iter().find(|allowed| *allowed == origin))
            .map(String::as_str)
            .unwrap_or(&self.default_origin)
    }
}

/// Layer that applies the CORS policy to every route.
#[derive(Clone)]
pub struct CorsLayer {
    config: Arc<CorsConfig>,
}

impl CorsLayer {
    pub fn new(config: CorsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsMiddleware {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Middleware that answers preflights and tags responses with CORS headers.
#[derive(Clone)]
pub struct CorsMiddleware<S> {
    inner: S,
    config: Arc<CorsConfig>,
}

impl<S> Service<Request<Body>> for CorsMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let request_origin = request
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let allow_origin = self.config.resolve(request_origin.as_deref()).to_string();

        // Preflight: respuesta inmediata, sin pasar por los handlers.
        if request.method() == Method::OPTIONS {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::OK;
            apply_cors_headers(response.headers_mut(), &allow_origin);
            return Box::pin(async move { Ok(response) });
        }

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            apply_cors_headers(response.headers_mut(), &allow_origin);
            Ok(response)
        })
    }
}

fn apply_cors_headers(headers: &mut HeaderMap, allow_origin: &str) {
    if let Ok(value) = HeaderValue::from_str(allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    // La respuesta varia por origen; los caches intermedios deben saberlo.
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}
