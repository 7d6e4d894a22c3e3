//! Middleware for protecting authenticated routes.
//!
//! Validates bearer access tokens and injects the decoded claims into the
//! request extensions, binding the token's subject to the request identity.
//! Refresh tokens are never accepted here; the renewal endpoint decodes
//! them itself.

use crate::api::common::service_error_to_response;
use crate::config::Config;
use crate::errors::TokenError;
use crate::utils::jwt::JwtCodec;
use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| service_error_to_response(TokenError::Validation.into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| service_error_to_response(TokenError::Validation.into()))?;

    let codec = JwtCodec::new(&config);
    match codec.decode_token(token) {
        Ok(claims) => {
            // Make the authenticated identity available to handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => Err(service_error_to_response(e.into())),
    }
}
