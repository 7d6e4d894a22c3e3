//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for login, token renewal,
//! and the current-user profile, parse request data, and delegate to the
//! `auth::service` for core business logic.

use crate::api::common::{ApiResponse, service_error_to_response};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    response::{Json as ResponseJson, Response},
};
use sqlx::SqlitePool;

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginToken>>, Response> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.login(payload).await {
        Ok(token) => Ok(ResponseJson(ApiResponse::success(token))),
        Err(error) => Err(service_error_to_response(error)),
    }
}

/// Handle token renewal request
///
/// The `Claims` extension comes from the `jwt_auth` middleware; its subject
/// is the identity the presented refresh token must match.
#[axum::debug_handler]
pub async fn new_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NewTokenRequest>,
) -> Result<ResponseJson<ApiResponse<NewToken>>, Response> {
    let current_user_id = claims
        .user_id()
        .map_err(|e| service_error_to_response(e.into()))?;

    let auth_service = AuthService::new(&pool, &config);

    match auth_service.new_token(current_user_id, payload).await {
        Ok(token) => Ok(ResponseJson(ApiResponse::success(token))),
        Err(error) => Err(service_error_to_response(error)),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, Response> {
    let user_id = claims
        .user_id()
        .map_err(|e| service_error_to_response(e.into()))?;

    let user_service = UserService::new(&pool, config);

    match user_service.get_user_required(user_id).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(UserInfo::from(user)))),
        Err(error) => Err(service_error_to_response(error)),
    }
}
