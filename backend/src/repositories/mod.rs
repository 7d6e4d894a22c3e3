//! Module for database repositories.
//!
//! Repositories own the SQL for a single entity and expose typed operations
//! to the service layer.

pub mod user_repository;
