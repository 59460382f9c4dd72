//! Password credential hashing.
//!
//! Passwords are never stored or compared in cleartext: registration hashes
//! with argon2 and login verifies against the PHC-format hash. Pure
//! computation, so it lives in core where every binary can reach it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors from credential handling.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password doesn't meet requirements.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,
    /// Hashing or hash parsing failed.
    #[error("password hashing error")]
    Hash,
    /// The password does not match the stored hash.
    #[error("invalid credentials")]
    Mismatch,
}

/// Validate a candidate password against the registration policy.
///
/// # Errors
///
/// Returns [`CredentialError::WeakPassword`] if too short.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::WeakPassword);
    }
    Ok(())
}

/// Hash a password into PHC string format.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CredentialError::Hash)
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] for an unparsable hash and
/// [`CredentialError::Mismatch`] for a wrong password.
pub fn verify_password(password: &str, hash: &str) -> Result<(), CredentialError> {
    let parsed = PasswordHash::new(hash).map_err(|_| CredentialError::Hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| CredentialError::Mismatch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(CredentialError::Mismatch)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_garbage_hash_is_rejected() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-hash"),
            Err(CredentialError::Hash)
        ));
    }
}
