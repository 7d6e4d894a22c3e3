//! Defines the HTTP routes for user registration and profiles.

use crate::api::user::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the user router with registration and profile routes
pub fn user_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route(
            "/users/{id}",
            get(get_user_by_id).layer(middleware::from_fn(jwt_auth)),
        )
}
