//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] driftline_core::EmailError),

    /// Invalid credentials (wrong password, or user missing/inactive).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("email already registered")]
    EmailExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Bearer token malformed, expired, or referencing an unusable user.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
