//! Error handling utilities for API responses.
//!
//! Provides the `{code, msg, data}` response envelope used by every endpoint
//! and the single translation point between service-layer errors and HTTP
//! responses. Internal errors (database, signing internals) are logged here
//! and never leak to the client.

use crate::errors::ServiceError;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Mirrors the HTTP status code
    pub code: u16,
    /// Human-readable message
    pub msg: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: "request success".to_string(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(code: StatusCode, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code: code.as_u16(),
            msg: msg.into(),
            data: None,
        }
    }
}

/// Converts a ServiceError into the HTTP response for the client.
///
/// Token failures additionally carry the `WWW-Authenticate: Bearer` hint.
pub fn service_error_to_response(error: ServiceError) -> Response {
    let (status, message) = match &error {
        ServiceError::Validation { message } => {
            (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
        }
        ServiceError::Request { message } => (StatusCode::BAD_REQUEST, message.clone()),
        ServiceError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
        ServiceError::Authorization { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        ServiceError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        ServiceError::Token(token_error) => (StatusCode::UNAUTHORIZED, token_error.to_string()),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    };

    let body = ApiResponse::<()>::error(status, message);
    let mut response = (status, Json(body)).into_response();

    if matches!(error, ServiceError::Token(_)) {
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer"),
        );
    }

    response
}
