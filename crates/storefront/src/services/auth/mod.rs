//! Authentication service.
//!
//! Registers and authenticates users against the store's user collection
//! and issues token sessions. The login identifier may be either the email
//! or the phone number. Registration auto-logs-in: a session is issued in
//! the same call.

mod error;

pub use error::AuthError;

use chrono::Duration;

use boostline_core::types::credential::{
    CredentialError, hash_password, validate_password, verify_password,
};
use boostline_core::types::{Email, SessionToken, WhatsappNumber};
use boostline_core::user::{User, UserRole};
use boostline_store::{JsonStore, RegisterError, SessionRecord};

/// Session lifetime in days (cookie max-age and store record agree).
pub const SESSION_TTL_DAYS: i64 = 7;

/// Authentication service.
pub struct AuthService<'a> {
    store: &'a JsonStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Register a new customer and log them straight in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` / `InvalidPhone` / `WeakPassword`
    /// for malformed input, `EmailTaken` / `PhoneTaken` on uniqueness
    /// conflicts, and `Store` on storage failure.
    pub async fn register(
        &self,
        email: &str,
        phone: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<(User, SessionRecord), AuthError> {
        let email = Email::parse(email)?;
        let phone = WhatsappNumber::parse(phone)?;
        validate_password(password).map_err(|e| AuthError::WeakPassword(e.to_string()))?;
        let password_hash = hash_password(password).map_err(|_| AuthError::PasswordHash)?;

        let user = self
            .store
            .users()
            .register(email, phone, password_hash, UserRole::Customer, name)
            .await
            .map_err(|e| match e {
                RegisterError::EmailTaken => AuthError::EmailTaken,
                RegisterError::PhoneTaken => AuthError::PhoneTaken,
                RegisterError::Store(e) => AuthError::Store(e),
            })?;

        let session = self.issue_session(user.clone()).await?;
        Ok((user, session))
    }

    /// Login with email-or-phone identifier and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown identifier or
    /// wrong password - deliberately the same error for both.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(User, SessionRecord), AuthError> {
        let record = self
            .store
            .users()
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        match verify_password(password, &record.password_hash) {
            Ok(()) => {}
            Err(CredentialError::Mismatch) => return Err(AuthError::InvalidCredentials),
            Err(_) => return Err(AuthError::PasswordHash),
        }

        let session = self.issue_session(record.user.clone()).await?;
        tracing::info!(customer_id = %record.user.id, "login");
        Ok((record.user, session))
    }

    /// End a session. Unknown tokens are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` on storage failure.
    pub async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.store.sessions().delete(token).await?;
        Ok(())
    }

    async fn issue_session(&self, user: User) -> Result<SessionRecord, AuthError> {
        Ok(self
            .store
            .sessions()
            .create(user, Duration::days(SESSION_TTL_DAYS))
            .await?)
    }
}
