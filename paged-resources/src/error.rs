//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// A sort specification could not be split into a field and a direction
    #[error("Malformed sort specification: {0}")]
    MalformedSort(String),

    /// Paging parameters in the request could not be understood
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A link URI could not be assembled from the request URI
    #[error("HTTP error: {0}")]
    Http(Box<axum::http::Error>),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a [`Error::MalformedSort`] carrying the offending input
    pub fn malformed_sort(input: impl Into<String>) -> Self {
        Self::MalformedSort(input.into())
    }

    /// HTTP status code this error maps to
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedSort(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Http(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedSort(_) => "MALFORMED_SORT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<axum::http::Error> for Error {
    fn from(err: axum::http::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let message = match &self {
            Error::MalformedSort(_) | Error::BadRequest(_) => {
                tracing::debug!(code, "Rejecting request: {}", self);
                self.to_string()
            }
            // Server-side details stay in the logs
            _ => {
                tracing::error!(code, "{}", self);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse::with_code(status, code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_sort_is_bad_request() {
        let err = Error::malformed_sort("name");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "MALFORMED_SORT");
        assert_eq!(err.to_string(), "Malformed sort specification: name");
    }

    #[test]
    fn test_internal_is_server_error() {
        let err = Error::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_into_response_status() {
        let response = Error::BadRequest("page must be a number".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_with_code() {
        let body = ErrorResponse::with_code(StatusCode::BAD_REQUEST, "MALFORMED_SORT", "bad");
        assert_eq!(body.status, 400);
        assert_eq!(body.code, Some("MALFORMED_SORT".to_string()));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "bad");
    }

    #[test]
    fn test_error_response_without_code_skips_field() {
        let body = ErrorResponse::new(StatusCode::BAD_REQUEST, "bad");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("code").is_none());
    }
}
