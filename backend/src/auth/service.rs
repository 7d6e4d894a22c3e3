//! Core business logic for the authentication system.
//!
//! Login and renewal both run as strict, short-circuiting check sequences:
//! lookup, credential verification, active check, then token minting. Token
//! issuance is stateless; renewal does not invalidate the previous pair,
//! which stays usable until natural expiry.

use crate::auth::models::*;
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult, TokenError};
use crate::repositories::user_repository::UserRepository;
use crate::utils::crypto::verify_password;
use crate::utils::jwt::JwtCodec;
use sqlx::SqlitePool;
use validator::Validate;

const TOKEN_TYPE: &str = "Bearer";

/// Authentication service for credential verification and token lifecycle.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    codec: JwtCodec,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            codec: JwtCodec::new(config),
        }
    }

    /// Authenticates a user and issues an access/refresh token pair.
    ///
    /// The refresh expiry chains off the freshly minted access expiry, so it
    /// is always the later of the two. The login-time stamp is a best-effort
    /// write: a failure there is logged and never overturns an already
    /// issued pair.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginToken> {
        if let Err(validation_errors) = login_request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_username(&login_request.username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        if !verify_password(&login_request.password, &user.password_hash) {
            return Err(ServiceError::authorization("Invalid Username or Password"));
        }

        if !user.is_active {
            return Err(ServiceError::authorization("User is locked, login failed"));
        }

        let sub = user.id.to_string();
        let (access_token, access_token_expire_time) = self.codec.create_access_token(&sub)?;
        let (refresh_token, refresh_token_expire_time) = self.codec.create_refresh_token(
            &sub,
            Some(access_token_expire_time),
            Some(user.is_multi_login),
        )?;

        if let Err(e) = repo.update_login_time(user.id).await {
            tracing::warn!(user_id = user.id, "failed to stamp login time: {}", e);
        }

        tracing::info!(user_id = user.id, "login succeeded");

        Ok(LoginToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            access_token_expire_time,
            refresh_token,
            refresh_token_type: TOKEN_TYPE.to_string(),
            refresh_token_expire_time,
            user: UserInfo::from(user),
        })
    }

    /// Exchanges a refresh token for a brand-new token pair.
    ///
    /// `current_user_id` is the identity bound to the request by the access
    /// token; a refresh token minted for a different principal is rejected
    /// before any repository access.
    pub async fn new_token(
        &self,
        current_user_id: i64,
        request: NewTokenRequest,
    ) -> ServiceResult<NewToken> {
        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let claims = self.codec.decode_token(&request.refresh_token)?;
        let token_user_id = claims.user_id()?;

        if token_user_id != current_user_id {
            return Err(TokenError::Invalid.into());
        }

        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(token_user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

        if !user.is_active {
            return Err(ServiceError::authorization(
                "User is locked, operation failed",
            ));
        }

        let sub = user.id.to_string();
        let (access_token, access_token_expire_time) = self.codec.create_access_token(&sub)?;
        let (refresh_token, refresh_token_expire_time) = self.codec.create_refresh_token(
            &sub,
            Some(access_token_expire_time),
            Some(user.is_multi_login),
        )?;

        tracing::info!(user_id = user.id, "token pair renewed");

        Ok(NewToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            access_token_expire_time,
            refresh_token,
            refresh_token_type: TOKEN_TYPE.to_string(),
            refresh_token_expire_time,
        })
    }
}
