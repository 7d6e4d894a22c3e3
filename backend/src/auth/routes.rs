//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login, token renewal, and the current-user
//! profile. They are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route(
            "/token/new",
            post(new_token).layer(middleware::from_fn(jwt_auth)),
        )
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}
