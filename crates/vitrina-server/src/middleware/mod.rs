//! Middleware stack para el servidor HTTP.
//!
//! Este modulo contiene los middleware de Tower que se aplican a todas las requests:
//! - `RequestIdLayer`: Genera/propaga X-Request-Id
//! - `LoggingLayer`: Logging estructurado de requests
//! - `CorsLayer`: CORS con allowlist de origenes por entorno

mod cors;
mod logging;
mod request_id;

pub use cors::{CorsConfig, CorsLayer, CorsMiddleware};
pub use logging::{LoggingLayer, LoggingMiddleware};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdMiddleware};
