//! Central module for application-wide configuration settings.
//!
//! Configuration is loaded once at startup and passed by value into the
//! services and the token codec; nothing reads the environment after that.

use crate::utils::generate_random_string::generate_random_string;
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub secret_key: String,
    /// Access-token lifetime. 60 minutes * 24 hours * 8 days by default.
    pub access_token_expire_minutes: i64,
    /// Offset added to the access-token expiry to place the refresh expiry.
    pub refresh_token_expire_minutes: i64,
    pub users_open_registration: bool,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        // Without an explicit secret every restart invalidates outstanding
        // tokens, which is the safe default.
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| generate_random_string(43));

        let access_token_expire_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "11520".to_string())
            .parse::<i64>()
            .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid number")?;

        let refresh_token_expire_minutes = env::var("REFRESH_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<i64>()
            .context("REFRESH_TOKEN_EXPIRE_MINUTES must be a valid number")?;

        let users_open_registration = env::var("USERS_OPEN_REGISTRATION")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("USERS_OPEN_REGISTRATION must be true or false")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            secret_key,
            access_token_expire_minutes,
            refresh_token_expire_minutes,
            users_open_registration,
            server_port,
        })
    }
}
