//! Database repository for user management operations.
//!
//! Provides lookups, existence checks, and writes for the User entity. The
//! registration-path methods take an explicit executor so the service layer
//! can run them inside a single scoped transaction.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::{SqlitePool, sqlite::Sqlite};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     is_superuser, is_multi_login, is_active, join_time, last_login_time";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by their unique identifier.
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their username.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Checks if a username already exists in the system.
    pub async fn username_exists<'e, E>(&self, executor: E, username: &str) -> Result<bool>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
                .bind(username)
                .fetch_one(executor)
                .await?;

        Ok(count > 0)
    }

    /// Checks if an email already exists in the system.
    pub async fn email_exists<'e, E>(&self, executor: E, email: &str) -> Result<bool>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(executor)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user row.
    ///
    /// The password in `user` must already be hashed.
    pub async fn create_user<'e, E>(&self, executor: E, user: CreateUser) -> Result<User>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, \
             is_superuser, is_multi_login, is_active, join_time) \
             VALUES (?, ?, ?, ?, ?, 0, 0, 1, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    /// Stamps the user's last login time with the current instant.
    ///
    /// Concurrent logins race on this column with last-writer-wins semantics;
    /// the value is informational only.
    pub async fn update_login_time(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_time = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Total number of user rows.
    pub async fn count_users(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    fn create_request(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$2b$12$abcdefghijklmnopqrstuvCDEFGHIJKLMNOPQRSTUVWXYZ012345".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.create_user(&pool, create_request("admin")).await.unwrap();
        assert!(created.is_active);
        assert!(!created.is_superuser);
        assert!(created.last_login_time.is_none());

        let by_id = repo.get_user_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "admin");

        let by_username = repo.get_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(by_username.id, created.id);

        let by_email = repo
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(repo.get_user_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_existence_checks() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        repo.create_user(&pool, create_request("admin")).await.unwrap();

        assert!(repo.username_exists(&pool, "admin").await.unwrap());
        assert!(!repo.username_exists(&pool, "ghost").await.unwrap());
        assert!(repo.email_exists(&pool, "admin@example.com").await.unwrap());
        assert!(!repo.email_exists(&pool, "ghost@example.com").await.unwrap());
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_login_time() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let created = repo.create_user(&pool, create_request("admin")).await.unwrap();

        repo.update_login_time(created.id).await.unwrap();

        let user = repo.get_user_by_id(created.id).await.unwrap().unwrap();
        assert!(user.last_login_time.is_some());
    }
}
