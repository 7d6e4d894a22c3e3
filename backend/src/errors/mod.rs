//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Represents failures while encoding or decoding signed tokens.
///
/// The decode failure kinds are kept distinct so the authentication service
/// can react differently to an expired token than to a forged one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token structure or signature is malformed.
    #[error("Token decode error")]
    Decode,
    /// The current instant is past the token's `exp` claim.
    #[error("Token Expired")]
    Expired,
    /// The claim set has an unexpected shape.
    #[error("Could not validate credentials")]
    Validation,
    /// The access-token expiry anchoring a chained refresh token is already past.
    #[error("Refresh token expired.")]
    RefreshExpired,
    /// The refresh token does not belong to the authenticated principal.
    #[error("Refresh token is invalid")]
    Invalid,
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Request error: {message}")]
    Request { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unauthorized: {message}")]
    Authorization { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
}
