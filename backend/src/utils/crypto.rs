//! Password hashing and verification using bcrypt.
//!
//! Stored passwords are always bcrypt hashes; plaintext never leaves this
//! module. The adaptive cost factor keeps hashing deliberately expensive.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password for storage.
///
/// Each call salts independently, so hashing the same password twice yields
/// different strings.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::validation(format!("Password hashing failed: {}", e)))
}

/// Verifies a plaintext password against a stored hash.
///
/// A malformed hash string counts as a mismatch, not an error.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}

/// Returns true if `candidate` already looks like a bcrypt hash.
///
/// Used by registration and credential-update flows to avoid double-hashing
/// a value that arrives pre-hashed (e.g. during data migration). The check
/// is on the modular crypt encoding: `$2a$`/`$2b$`/`$2y$`, a two-digit cost,
/// and a fixed 60-character length.
pub fn is_password_hashed(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != 60 {
        return false;
    }
    let prefix = &candidate[..4];
    if prefix != "$2a$" && prefix != "$2b$" && prefix != "$2y$" {
        return false;
    }
    bytes[4].is_ascii_digit() && bytes[5].is_ascii_digit() && bytes[6] == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let hashed = hash_password("string").unwrap();

        assert!(verify_password("string", &hashed));
        assert!(!verify_password("wrong", &hashed));
    }

    #[test]
    fn test_distinct_salts() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        // Same input must produce different hashes
        assert_ne!(first, second);
        assert!(verify_password("same password", &first));
        assert!(verify_password("same password", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("string", "not a bcrypt hash"));
        assert!(!verify_password("string", ""));
    }

    #[test]
    fn test_hash_detection() {
        let hashed = hash_password("string").unwrap();

        assert!(is_password_hashed(&hashed));
        assert!(!is_password_hashed("string"));
        assert!(!is_password_hashed("hunter2hunter2"));
        // Right prefix, wrong length
        assert!(!is_password_hashed("$2b$12$tooshort"));
    }
}
