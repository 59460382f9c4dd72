//! User records and registration.
//!
//! Registration is the one place uniqueness matters: email and phone must be
//! unique across all users, and the generated customer ID is regenerated
//! until unused. All three checks and the insert happen inside a single
//! document update, i.e. under the users-document lock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use boostline_core::types::{CustomerId, Email, WhatsappNumber};
use boostline_core::user::{User, UserRole};

use crate::engine::{Document, JsonStore};
use crate::error::StoreError;

/// A stored user: the domain identity plus its password hash. The hash
/// never leaves this layer except for verification by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Domain identity (what sessions snapshot).
    pub user: User,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
}

/// Errors rejecting a registration.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,
    /// The phone number is already registered.
    #[error("phone number already registered")]
    PhoneTaken,
    /// Underlying storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repository for user records.
pub struct UserRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub(crate) const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Duplicate email/phone are rejected without mutating the collection.
    /// Customer-ID collisions are not surfaced: the ID silently regenerates
    /// until it is unique.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::EmailTaken`] / [`RegisterError::PhoneTaken`]
    /// on a uniqueness conflict, or [`RegisterError::Store`] on storage
    /// failure.
    pub async fn register(
        &self,
        email: Email,
        phone: WhatsappNumber,
        password_hash: String,
        role: UserRole,
        name: Option<String>,
    ) -> Result<User, RegisterError> {
        self.store
            .update(Document::Users, move |records: &mut Vec<UserRecord>| {
                if records.iter().any(|r| r.user.email == email) {
                    return Err(RegisterError::EmailTaken);
                }
                if records.iter().any(|r| r.user.phone == phone) {
                    return Err(RegisterError::PhoneTaken);
                }

                let mut id = CustomerId::generate();
                while records.iter().any(|r| r.user.id == id) {
                    id = CustomerId::generate();
                }

                let user = User {
                    id,
                    email,
                    phone,
                    role,
                    name,
                };
                records.push(UserRecord {
                    user: user.clone(),
                    password_hash,
                });
                tracing::info!(customer_id = %user.id, role = %user.role, "user registered");
                Ok(user)
            })
            .await
    }

    /// Find a user record by email or phone.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let records: Vec<UserRecord> = self.store.read(Document::Users).await?;
        Ok(records
            .into_iter()
            .find(|r| r.user.email.as_str() == identifier || r.user.phone.as_str() == identifier))
    }

    /// Fetch a user record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn get(&self, id: &CustomerId) -> Result<Option<UserRecord>, StoreError> {
        let records: Vec<UserRecord> = self.store.read(Document::Users).await?;
        Ok(records.into_iter().find(|r| &r.user.id == id))
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let records: Vec<UserRecord> = self.store.read(Document::Users).await?;
        Ok(records.len())
    }
}
