//! Error kinds for the credential store, token authority and session gate.

use thiserror::Error;

/// Credential store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username already taken")]
    DuplicateUsername,

    /// Unknown username and wrong password collapse into this one kind.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Token verification / issuance failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Session gate outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// No bearer credential was presented.
    #[error("Access denied")]
    AccessDenied,

    /// A credential was presented but did not verify.
    #[error("Invalid token")]
    Forbidden(#[source] TokenError),
}
