//! Error types: request rejections with HTTP response mapping, and
//! fatal startup failures.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level error that maps to an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body claimed to be JSON but could not be parsed.
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    /// The body parsed, but its top-level value is neither an object nor an array.
    #[error("JSON body must be an object or an array")]
    UnsupportedJsonValue,

    /// The body exceeds the configured size limit.
    #[error("JSON body exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The body stream failed before it was fully buffered.
    #[error("Failed to read request body: {0}")]
    BodyRead(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedJson(_)
            | ApiError::UnsupportedJsonValue
            | ApiError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Errors that prevent the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The listen address could not be bound, e.g. the port is already in use.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The server loop terminated with an I/O error.
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            ApiError::MalformedJson("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedJsonValue.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[tokio::test]
    async fn test_rejection_body_is_json() {
        let response = ApiError::PayloadTooLarge { limit: 10 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "JSON body exceeds the limit of 10 bytes");
    }

    #[test]
    fn test_bind_error_names_address() {
        let err = StartupError::Bind {
            addr: "0.0.0.0:3000".to_string(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to bind 0.0.0.0:3000: "));
    }
}
