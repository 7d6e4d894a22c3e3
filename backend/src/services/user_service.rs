//! User business logic service.
//!
//! Handles self-registration and user lookups. Registration runs its
//! duplicate checks and the insert inside one scoped transaction so a
//! failure on any path rolls the whole attempt back.

use crate::config::Config;
use crate::database::models::{CreateUser, RegisterUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::crypto::{hash_password, is_password_hashed};
use sqlx::SqlitePool;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    config: Config,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    pub fn new(pool: &'a SqlitePool, config: Config) -> Self {
        Self { pool, config }
    }

    /// Registers a new user through open self-registration.
    ///
    /// The open-registration gate is checked before anything touches the
    /// repository. Duplicate checks and the insert share one transaction;
    /// dropping it on an error path rolls back automatically.
    pub async fn register(&self, user_data: RegisterUser) -> ServiceResult<User> {
        if !self.config.users_open_registration {
            return Err(ServiceError::forbidden(
                "Open user registration is forbidden on this server",
            ));
        }

        if let Err(validation_errors) = user_data.validate() {
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

        if user_data.password.is_empty() {
            return Err(ServiceError::forbidden("Password is empty"));
        }

        let repo = UserRepository::new(self.pool);
        let mut tx = self.pool.begin().await.map_err(anyhow::Error::from)?;

        if repo.username_exists(&mut *tx, &user_data.username).await? {
            return Err(ServiceError::request("This username is already registered"));
        }

        if repo.email_exists(&mut *tx, &user_data.email).await? {
            return Err(ServiceError::request("The email has been registered"));
        }

        // Values arriving pre-hashed (migrations, re-validation flows) are
        // stored as-is; everything else gets hashed here.
        let password_hash = if is_password_hashed(&user_data.password) {
            user_data.password.clone()
        } else {
            hash_password(&user_data.password)?
        };

        let user = repo
            .create_user(
                &mut *tx,
                CreateUser {
                    username: user_data.username,
                    email: user_data.email,
                    password_hash,
                    first_name: user_data.first_name,
                    last_name: user_data.last_name,
                },
            )
            .await?;

        tx.commit().await.map_err(anyhow::Error::from)?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: i64) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::crypto::verify_password;
    use sqlx::sqlite::SqlitePoolOptions;

    fn test_config(open_registration: bool) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            secret_key: "test-secret-key-for-unit-tests".to_string(),
            access_token_expire_minutes: 60,
            refresh_token_expire_minutes: 15,
            users_open_registration: open_registration,
            server_port: 3000,
        }
    }

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    fn register_request(username: &str, email: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "string".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        let user = service
            .register(register_request("admin", "admin@example.com"))
            .await
            .unwrap();

        assert_ne!(user.password_hash, "string");
        assert!(verify_password("string", &user.password_hash));
        assert!(user.is_active);
        assert!(user.last_login_time.is_none());
    }

    #[tokio::test]
    async fn test_register_keeps_prehashed_password() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        let hashed = hash_password("string").unwrap();
        let mut request = register_request("admin", "admin@example.com");
        request.password = hashed.clone();

        let user = service.register(request).await.unwrap();
        assert_eq!(user.password_hash, hashed);
    }

    #[tokio::test]
    async fn test_register_closed_makes_no_repository_calls() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(false));

        let result = service
            .register(register_request("admin", "admin@example.com"))
            .await;

        match result {
            Err(ServiceError::Forbidden { message }) => {
                assert_eq!(message, "Open user registration is forbidden on this server")
            }
            other => panic!("expected Forbidden, got {:?}", other.map(|u| u.id)),
        }
        let count = UserRepository::new(&pool).count_users().await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_register_empty_password_is_forbidden() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        let mut request = register_request("admin", "admin@example.com");
        request.password = String::new();

        match service.register(request).await {
            Err(ServiceError::Forbidden { message }) => {
                assert_eq!(message, "Password is empty")
            }
            other => panic!("expected Forbidden, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        service
            .register(register_request("admin", "admin@example.com"))
            .await
            .unwrap();

        match service
            .register(register_request("admin", "other@example.com"))
            .await
        {
            Err(ServiceError::Request { message }) => {
                assert_eq!(message, "This username is already registered")
            }
            other => panic!("expected Request, got {:?}", other.map(|u| u.id)),
        }
        let count = UserRepository::new(&pool).count_users().await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        service
            .register(register_request("admin", "admin@example.com"))
            .await
            .unwrap();

        match service
            .register(register_request("other", "admin@example.com"))
            .await
        {
            Err(ServiceError::Request { message }) => {
                assert_eq!(message, "The email has been registered")
            }
            other => panic!("expected Request, got {:?}", other.map(|u| u.id)),
        }
        let count = UserRepository::new(&pool).count_users().await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_get_user_required_missing() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, test_config(true));

        match service.get_user_required(404).await {
            Err(ServiceError::NotFound { message }) => {
                assert_eq!(message, "User does not exist")
            }
            other => panic!("expected NotFound, got {:?}", other.map(|u| u.id)),
        }
    }
}
