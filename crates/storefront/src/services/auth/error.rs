//! Authentication error types.

use thiserror::Error;

use boostline_core::types::{EmailError, PhoneError};
use boostline_store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid phone format.
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The email is already registered.
    #[error("Email already registered.")]
    EmailTaken,

    /// The phone number is already registered.
    #[error("Phone number already registered.")]
    PhoneTaken,

    /// Invalid credentials (wrong password or unknown identifier).
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
