//! Server error types with HTTP status code mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use hexcoord_shared::errors::HexcoordError;

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Service layer error
    #[error("{0}")]
    Core(#[from] HexcoordError),

    /// Blocking database task panicked or was cancelled
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// JSON error body: `{"ok": false, "error": "..."}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ServerError {
    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Core(HexcoordError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServerError::Core(HexcoordError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Core(_) | ServerError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        // Missing assets answer in plain text, like any static file server
        if let ServerError::Core(HexcoordError::NotFound(msg)) = &self {
            return (status, msg.clone()).into_response();
        }

        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (HexcoordError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (HexcoordError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (HexcoordError::Database("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (HexcoordError::Export("zip".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }
}
