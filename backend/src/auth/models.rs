//! Data structures for authentication-related entities.
//!
//! Request payloads for login and token renewal, the token-pair responses,
//! and the user summary embedded in them. `UserInfo` is a flat projection of
//! the persisted user; the password hash has no field here at all.

use crate::database::models::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token renewal request
#[derive(Debug, Deserialize, Validate)]
pub struct NewTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// User summary returned by login, registration, and profile endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: bool,
    pub is_active: bool,
    pub join_time: DateTime<Utc>,
    pub last_login_time: Option<DateTime<Utc>>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_superuser: user.is_superuser,
            is_active: user.is_active,
            join_time: user.join_time,
            last_login_time: user.last_login_time,
        }
    }
}

/// Token pair issued on login, with the authenticated user's summary.
#[derive(Debug, Serialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: String,
    pub access_token_expire_time: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_type: String,
    pub refresh_token_expire_time: DateTime<Utc>,
    pub user: UserInfo,
}

/// Token pair issued on renewal.
#[derive(Debug, Serialize)]
pub struct NewToken {
    pub access_token: String,
    pub token_type: String,
    pub access_token_expire_time: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_type: String,
    pub refresh_token_expire_time: DateTime<Utc>,
}
