//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models;
//! the password hash in particular never crosses the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: bool,
    pub is_multi_login: bool,
    pub is_active: bool,
    pub join_time: DateTime<Utc>,
    pub last_login_time: Option<DateTime<Utc>>,
}

/// Self-registration request payload.
///
/// The password is deliberately unconstrained here: an empty password is a
/// business-rule failure (403), not a schema failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(
        min = 1,
        max = 20,
        message = "Username must be between 1-20 characters"
    ))]
    pub username: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 50, message = "Email too long")
    )]
    pub email: String,

    pub password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Internal creation DTO; the password is already hashed by the time this
/// struct exists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(
        min = 1,
        max = 20,
        message = "Username must be between 1-20 characters"
    ))]
    pub username: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 50, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
