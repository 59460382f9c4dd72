//! Newtype IDs for type-safe entity references.
//!
//! Orders, customers, cart items, devices, and sessions each get their own
//! wrapper so an ID from one namespace can never be passed where another is
//! expected.
//!
//! The two human-facing identifiers deliberately differ in their collision
//! strategy: customer IDs are long-lived identity keys, so registration loops
//! regenerating until the ID is unused; order IDs are high-cardinality
//! tracking tokens, but inserts apply the same recheck loop anyway.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdError {
    /// Wrong length for this identifier type.
    #[error("{kind} must be exactly {expected} characters")]
    WrongLength {
        /// Identifier kind (for the message).
        kind: &'static str,
        /// Expected length.
        expected: usize,
    },
    /// A character outside the allowed alphabet.
    #[error("{kind} may only contain ASCII letters and digits")]
    InvalidCharacter {
        /// Identifier kind (for the message).
        kind: &'static str,
    },
    /// Missing the required prefix.
    #[error("{kind} must start with `{prefix}`")]
    MissingPrefix {
        /// Identifier kind (for the message).
        kind: &'static str,
        /// Required prefix.
        prefix: &'static str,
    },
}

/// Sample `len` characters uniformly from the 62-character alphanumeric
/// alphabet.
fn random_alphanumeric(len: usize) -> String {
    use rand::Rng;
    use rand::distr::Alphanumeric;

    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn is_alphanumeric(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric())
}

// =============================================================================
// OrderId
// =============================================================================

/// An order identifier: 15 random alphanumeric characters.
///
/// Distinct namespace from [`CustomerId`] - no prefix, different length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Length of a generated order ID.
    pub const LENGTH: usize = 15;

    /// Generate a fresh random order ID.
    ///
    /// Uniqueness against existing orders is enforced at insert time by the
    /// order repository, not here.
    #[must_use]
    pub fn generate() -> Self {
        Self(random_alphanumeric(Self::LENGTH))
    }

    /// Parse an order ID from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 15 alphanumeric
    /// characters.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() != Self::LENGTH {
            return Err(IdError::WrongLength {
                kind: "order id",
                expected: Self::LENGTH,
            });
        }
        if !is_alphanumeric(s) {
            return Err(IdError::InvalidCharacter { kind: "order id" });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// CustomerId
// =============================================================================

/// A customer identifier: the fixed `CUS` prefix plus 12 random alphanumeric
/// characters (15 characters total), or the guest sentinel `GUEST`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Fixed prefix for generated customer IDs.
    pub const PREFIX: &'static str = "CUS";

    /// Length of the random part after the prefix.
    pub const RANDOM_LENGTH: usize = 12;

    /// Sentinel for orders placed without an account.
    const GUEST: &'static str = "GUEST";

    /// Generate a fresh random customer ID.
    ///
    /// Registration must regenerate until no existing user holds the ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Self::PREFIX,
            random_alphanumeric(Self::RANDOM_LENGTH)
        ))
    }

    /// The guest sentinel used when an order has no owning account.
    #[must_use]
    pub fn guest() -> Self {
        Self(Self::GUEST.to_owned())
    }

    /// Whether this is the guest sentinel.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.0 == Self::GUEST
    }

    /// Parse a customer ID from a string.
    ///
    /// Accepts the `CUS`-prefixed format and the guest sentinel.
    ///
    /// # Errors
    ///
    /// Returns an error if the input matches neither form.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s == Self::GUEST {
            return Ok(Self(s.to_owned()));
        }
        let Some(rest) = s.strip_prefix(Self::PREFIX) else {
            return Err(IdError::MissingPrefix {
                kind: "customer id",
                prefix: Self::PREFIX,
            });
        };
        if rest.len() != Self::RANDOM_LENGTH {
            return Err(IdError::WrongLength {
                kind: "customer id",
                expected: Self::PREFIX.len() + Self::RANDOM_LENGTH,
            });
        }
        if !is_alphanumeric(rest) {
            return Err(IdError::InvalidCharacter {
                kind: "customer id",
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// CartItemId / DeviceId
// =============================================================================

/// A cart line-item identifier (random UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(Uuid);

impl CartItemId {
    /// Create a fresh random item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CartItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CartItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifies one browser/device. Carts are keyed by device, not by user:
/// switching accounts on the same device shares the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Create a fresh device ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DeviceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// =============================================================================
// SessionToken
// =============================================================================

/// An opaque session token: 32 random alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Length of a generated token.
    pub const LENGTH: usize = 32;

    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(random_alphanumeric(Self::LENGTH))
    }

    /// Wrap a token received from a client cookie.
    ///
    /// No validation beyond ownership - an unknown token simply resolves to
    /// no session.
    #[must_use]
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_generate_shape() {
        let id = OrderId::generate();
        assert_eq!(id.as_str().len(), 15);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_order_id_parse_rejects_bad_input() {
        assert!(OrderId::parse("short").is_err());
        assert!(OrderId::parse("has-punctuation").is_err());
        assert!(OrderId::parse("aaaaaaaaaaaaaaaa").is_err()); // 16 chars
        assert!(OrderId::parse("aB3aB3aB3aB3aB3").is_ok());
    }

    #[test]
    fn test_customer_id_generate_shape() {
        let id = CustomerId::generate();
        assert_eq!(id.as_str().len(), 15);
        assert!(id.as_str().starts_with("CUS"));
        assert!(!id.is_guest());
    }

    #[test]
    fn test_customer_id_guest_sentinel() {
        let guest = CustomerId::guest();
        assert!(guest.is_guest());
        assert_eq!(guest.as_str(), "GUEST");
        assert!(CustomerId::parse("GUEST").unwrap().is_guest());
    }

    #[test]
    fn test_customer_id_parse_rejects_bad_input() {
        assert!(CustomerId::parse("XYZa9K2X7mP0QZ4").is_err()); // wrong prefix
        assert!(CustomerId::parse("CUSshort").is_err());
        assert!(CustomerId::parse("CUSa9K2X7mP0QZ4").is_ok());
    }

    #[test]
    fn test_session_token_length() {
        assert_eq!(SessionToken::generate().as_str().len(), 32);
    }

    #[test]
    fn test_ids_are_distinct_across_generations() {
        // Statistically certain; a failure here means the RNG is broken.
        assert_ne!(OrderId::generate(), OrderId::generate());
        assert_ne!(CustomerId::generate(), CustomerId::generate());
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::parse("aB3aB3aB3aB3aB3").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"aB3aB3aB3aB3aB3\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
