//! Password hashing.
//!
//! Argon2id with per-password random salts. Hashes are stored in PHC string
//! format so parameters can change without invalidating existing records.
//!
//! # Examples
//!
//! ```
//! use pedika_common::crypto::{hash_password, verify_password};
//!
//! let hash = hash_password("rahasia123").expect("Failed to hash");
//! assert!(hash.starts_with("$argon2"));
//! assert!(verify_password("rahasia123", &hash).expect("Failed to verify"));
//! assert!(!verify_password("salah", &hash).expect("Failed to verify"));
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{AppError, AppResult};

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
