//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`)
//! carrying their own salt and parameters, so verification needs nothing
//! but the stored string.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::error::StoreError;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Hashing(e.to_string()))
}

/// Check a password against a stored PHC hash.
///
/// Comparison is done by the argon2 verifier (constant time). A hash that
/// fails to parse is an internal error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, StoreError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| StoreError::Hashing(format!("bad hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
