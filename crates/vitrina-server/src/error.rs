use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Errors a handler can surface to an HTTP client.
///
/// The wire shape is a single-field envelope `{"error": "<message>"}` and
/// the storefront front-end matches on the exact message strings, so the
/// variants carry the literal text to send.
#[derive(Debug)]
pub enum AppError {
    /// Entrada requerida ausente o invalida
    BadRequest(&'static str),

    /// Sin credencial, o credencial que no verifica
    Unauthorized(&'static str),

    /// Credencial valida sin el permiso requerido
    Forbidden(&'static str),

    /// Consulta bien formada sin resultado
    NotFound(&'static str),

    /// Error interno; el detalle se loguea, nunca se envia
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Creates an internal error from any displayable detail.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::Internal(detail) => {
                // El cliente recibe un mensaje generico; el detalle queda en el log.
                tracing::error!(detail = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}
