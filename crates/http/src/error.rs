//! Error handling for the bookstore HTTP layer

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// Header carrying the id that ties an error response to its log line.
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Message returned when a route is hit with a method it does not declare.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method is not allowed";

/// Application error types that map to HTTP responses
///
/// Every variant renders as a plain-text body holding only `message`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("method not allowed: {message}")]
    MethodNotAllowed { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    /// Unexpected failure, such as a panicking handler.
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl AppError {
    /// Create a method-not-allowed error.
    ///
    /// Rejected methods answer `400 Bad Request` rather than `405`.
    pub fn method_not_allowed() -> Self {
        Self::MethodNotAllowed {
            message: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            code: "method_not_allowed".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed { .. } | AppError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let status = self.status();

        let (error_code, message) = match self {
            AppError::MethodNotAllowed { message, code }
            | AppError::NotFound { message, code }
            | AppError::BadRequest { message, code } => (code, message),
            AppError::Internal(e) => ("internal_error".to_string(), format!("{:#}", e)),
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                error = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        }

        // In production, we might want to hide internal error details
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let mut response = (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            message,
        )
            .into_response();

        if let Ok(value) = HeaderValue::from_str(&error_id.to_string()) {
            response.headers_mut().insert(TRACE_ID_HEADER, value);
        }

        response
    }
}
