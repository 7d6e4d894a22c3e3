//! JWT token utilities for authentication and authorization.
//!
//! Provides creation and validation of access and refresh tokens. Both token
//! kinds share the same encoding scheme and signing secret; refresh tokens
//! are only ever exchanged for new token pairs and must never be accepted as
//! bearer credentials by protected endpoints.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceResult, TokenError};

/// JWT claims carried by both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID, string-encoded
    pub sub: String,
    /// Token expiration timestamp (unix seconds)
    pub exp: usize,
    /// Token issued at timestamp (unix seconds)
    pub iat: usize,
    /// Multi-login policy flag, carried through refresh-token renewal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_login: Option<bool>,
}

impl Claims {
    /// Parses the subject claim back into a user id.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Validation)
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now > self.exp
    }
}

/// Codec for creating and validating signed tokens.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtCodec {
    /// Builds a codec from the injected configuration.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact; no grace window.
        validation.leeway = 0;

        JwtCodec {
            encoding_key,
            decoding_key,
            validation,
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::minutes(config.refresh_token_expire_minutes),
        }
    }

    /// Generates an access token for the given subject.
    ///
    /// Returns the compact token string together with its expiry instant.
    pub fn create_access_token(&self, sub: &str) -> ServiceResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expire = now + self.access_ttl;

        let claims = Claims {
            sub: sub.to_owned(),
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
            multi_login: None,
        };

        let token = self.sign(&claims)?;
        Ok((token, expire))
    }

    /// Generates a refresh token for the given subject.
    ///
    /// The refresh expiry chains off the paired access token: when
    /// `access_expire` is provided, the refresh token expires that instant
    /// plus the refresh TTL. An anchor that is already past is rejected with
    /// `TokenError::RefreshExpired`.
    pub fn create_refresh_token(
        &self,
        sub: &str,
        access_expire: Option<DateTime<Utc>>,
        multi_login: Option<bool>,
    ) -> ServiceResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expire = match access_expire {
            Some(anchor) => {
                if anchor < now {
                    return Err(TokenError::RefreshExpired.into());
                }
                anchor + self.refresh_ttl
            }
            None => now + self.refresh_ttl,
        };

        let claims = Claims {
            sub: sub.to_owned(),
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
            multi_login,
        };

        let token = self.sign(&claims)?;
        Ok((token, expire))
    }

    /// Validates a token's signature and expiry and returns its claims.
    pub fn decode_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::Base64(_)
                | ErrorKind::Utf8(_) => TokenError::Decode,
                _ => TokenError::Validation,
            })
    }

    fn sign(&self, claims: &Claims) -> ServiceResult<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            crate::errors::ServiceError::validation(format!("Token generation failed: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            secret_key: "test-secret-key-for-unit-tests".to_string(),
            access_token_expire_minutes: 60,
            refresh_token_expire_minutes: 15,
            users_open_registration: true,
            server_port: 3000,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let codec = JwtCodec::new(&test_config());

        let (token, expire) = codec.create_access_token("42").unwrap();
        let claims = codec.decode_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp as i64, expire.timestamp());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_carries_multi_login() {
        let codec = JwtCodec::new(&test_config());

        let (token, _) = codec.create_refresh_token("42", None, Some(true)).unwrap();
        let claims = codec.decode_token(&token).unwrap();

        assert_eq!(claims.multi_login, Some(true));
    }

    #[test]
    fn test_refresh_expiry_chains_off_access_expiry() {
        let codec = JwtCodec::new(&test_config());

        let (_, access_expire) = codec.create_access_token("7").unwrap();
        let (_, refresh_expire) = codec
            .create_refresh_token("7", Some(access_expire), None)
            .unwrap();

        assert_eq!(refresh_expire, access_expire + Duration::minutes(15));
        assert!(refresh_expire > access_expire);
    }

    #[test]
    fn test_refresh_token_rejects_past_anchor() {
        let codec = JwtCodec::new(&test_config());

        let stale = Utc::now() - Duration::hours(1);
        let result = codec.create_refresh_token("7", Some(stale), None);

        match result {
            Err(ServiceError::Token(TokenError::RefreshExpired)) => {}
            other => panic!("expected RefreshExpired, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_expired_token_is_expired_not_malformed() {
        let codec = JwtCodec::new(&test_config());

        let now = Utc::now();
        let claims = Claims {
            sub: "42".to_string(),
            exp: (now - Duration::hours(2)).timestamp() as usize,
            iat: (now - Duration::hours(3)).timestamp() as usize,
            multi_login: None,
        };
        let key = EncodingKey::from_secret(test_config().secret_key.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert_eq!(codec.decode_token(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_token_is_decode_error() {
        let codec = JwtCodec::new(&test_config());

        assert_eq!(
            codec.decode_token("not.a.token").unwrap_err(),
            TokenError::Decode
        );
    }

    #[test]
    fn test_wrong_secret_is_decode_error() {
        let codec = JwtCodec::new(&test_config());

        let mut other = test_config();
        other.secret_key = "a-completely-different-secret".to_string();
        let (token, _) = JwtCodec::new(&other).create_access_token("42").unwrap();

        assert_eq!(codec.decode_token(&token).unwrap_err(), TokenError::Decode);
    }
}
