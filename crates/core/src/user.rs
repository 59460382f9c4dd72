//! User identity.
//!
//! The domain `User` carries no secret material - password hashes live in
//! the store's user records, and session snapshots embed this type only.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Email, WhatsappNumber};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular storefront customer.
    #[default]
    Customer,
    /// Order-management access in the admin panel.
    Admin,
}

impl UserRole {
    /// Whether this role grants admin-panel access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A registered user.
///
/// Created at registration and effectively immutable afterwards; sessions
/// hold a full snapshot of this record, so staleness is bounded by that
/// immutability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique customer ID (`CUS` + 12 random alphanumerics).
    pub id: CustomerId,
    /// Unique email address.
    pub email: Email,
    /// Unique 11-digit WhatsApp contact number.
    pub phone: WhatsappNumber,
    /// Account role.
    pub role: UserRole,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Customer).unwrap(),
            "\"customer\""
        );
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_user_roundtrip() {
        let user = User {
            id: CustomerId::generate(),
            email: Email::parse("user@example.com").unwrap(),
            phone: WhatsappNumber::parse("94712345678").unwrap(),
            role: UserRole::Customer,
            name: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
