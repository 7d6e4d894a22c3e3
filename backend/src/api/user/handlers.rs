//! Handler functions for user registration and profile API endpoints.
//!
//! These functions process requests for user data, delegate to the user
//! service, and return user summaries. The stored password hash never
//! appears in any response here.

use crate::api::common::{ApiResponse, service_error_to_response};
use crate::auth::models::UserInfo;
use crate::config::Config;
use crate::database::models::RegisterUser;
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    response::{Json as ResponseJson, Response},
};
use sqlx::SqlitePool;

/// Handle open self-registration
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterUser>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, Response> {
    let user_service = UserService::new(&pool, config);

    match user_service.register(payload).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(UserInfo::from(user)))),
        Err(error) => Err(service_error_to_response(error)),
    }
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, Response> {
    tracing::info!("Getting user by ID: {} for user: {}", id, claims.sub);

    let user_service = UserService::new(&pool, config);

    match user_service.get_user_required(id).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(UserInfo::from(user)))),
        Err(error) => Err(service_error_to_response(error)),
    }
}
