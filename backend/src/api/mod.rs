//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the user-facing API
//! domains, excluding core authentication routes which are handled
//! separately.

pub mod common;
pub mod user;
