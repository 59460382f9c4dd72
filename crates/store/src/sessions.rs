//! Token sessions.
//!
//! A session maps an opaque token to a full [`User`] snapshot plus expiry.
//! The snapshot can go stale relative to the user record; that is accepted
//! because user records are effectively immutable after creation.
//!
//! Expired sessions are swept opportunistically whenever a new session is
//! created.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use boostline_core::types::SessionToken;
use boostline_core::user::User;

use crate::engine::{Document, JsonStore};
use crate::error::StoreError;

/// One active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque bearer token, held by the client in a cookie.
    pub token: SessionToken,
    /// Full user snapshot at login time.
    pub user: User,
    /// When the session was issued.
    pub created_at: DateTime<Utc>,
    /// When the session stops resolving.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session is past its expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Repository for session records.
pub struct SessionRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub(crate) const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Issue a session for `user`, valid for `ttl`.
    ///
    /// Token collisions regenerate silently; expired sessions are swept in
    /// the same write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn create(&self, user: User, ttl: Duration) -> Result<SessionRecord, StoreError> {
        let now = Utc::now();
        self.store
            .update(
                Document::Sessions,
                move |sessions: &mut Vec<SessionRecord>| {
                    sessions.retain(|s| !s.is_expired());

                    let mut token = SessionToken::generate();
                    while sessions.iter().any(|s| s.token == token) {
                        token = SessionToken::generate();
                    }

                    let record = SessionRecord {
                        token,
                        user,
                        created_at: now,
                        expires_at: now + ttl,
                    };
                    sessions.push(record.clone());
                    tracing::debug!(customer_id = %record.user.id, "session issued");
                    Ok(record)
                },
            )
            .await
    }

    /// Resolve a token to its session, if present and unexpired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        let sessions: Vec<SessionRecord> = self.store.read(Document::Sessions).await?;
        Ok(sessions
            .into_iter()
            .find(|s| &s.token == token && !s.is_expired()))
    }

    /// Delete a session (logout). Deleting an unknown token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn delete(&self, token: &SessionToken) -> Result<(), StoreError> {
        let token = token.clone();
        self.store
            .update(
                Document::Sessions,
                move |sessions: &mut Vec<SessionRecord>| {
                    sessions.retain(|s| s.token != token);
                    Ok::<_, StoreError>(())
                },
            )
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boostline_core::types::{Email, WhatsappNumber};
    use boostline_core::user::UserRole;

    async fn store() -> JsonStore {
        let dir = std::env::temp_dir().join(format!("boostline-sessions-{}", uuid::Uuid::new_v4()));
        JsonStore::open(dir).await.unwrap()
    }

    fn user() -> User {
        User {
            id: boostline_core::types::CustomerId::generate(),
            email: Email::parse("a@example.com").unwrap(),
            phone: WhatsappNumber::parse("94712345678").unwrap(),
            role: UserRole::Customer,
            name: None,
        }
    }

    #[tokio::test]
    async fn test_create_resolve_delete() {
        let store = store().await;
        let sessions = store.sessions();

        let record = sessions.create(user(), Duration::days(7)).await.unwrap();
        assert_eq!(record.token.as_str().len(), 32);

        let resolved = sessions.get(&record.token).await.unwrap().unwrap();
        assert_eq!(resolved.user.id, record.user.id);

        sessions.delete(&record.token).await.unwrap();
        assert!(sessions.get(&record.token).await.unwrap().is_none());

        // Logout is idempotent.
        sessions.delete(&record.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_sessions_do_not_resolve() {
        let store = store().await;
        let sessions = store.sessions();

        let record = sessions
            .create(user(), Duration::seconds(-1))
            .await
            .unwrap();
        assert!(sessions.get(&record.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let store = store().await;
        let token = SessionToken::from_raw("definitely-not-issued");
        assert!(store.sessions().get(&token).await.unwrap().is_none());
    }
}
