//! Phone-number types.
//!
//! Two deliberately different formats coexist:
//!
//! - [`WhatsappNumber`]: the 11-digit international contact number attached
//!   to cart items and user accounts (e.g. `94712345678`).
//! - [`SenderPhone`]: the 10-digit local payment-app number submitted as part
//!   of the payment proof at checkout (e.g. `0771234567`).
//!
//! Mixing the two up is a category error, hence separate newtypes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a phone number.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// Wrong number of digits.
    #[error("{kind} must be exactly {expected} digits")]
    WrongLength {
        /// Which phone kind failed (for the message).
        kind: &'static str,
        /// Expected digit count.
        expected: usize,
    },
    /// A non-digit character.
    #[error("{kind} may only contain digits")]
    NonDigit {
        /// Which phone kind failed (for the message).
        kind: &'static str,
    },
}

fn validate_digits(s: &str, kind: &'static str, expected: usize) -> Result<(), PhoneError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PhoneError::NonDigit { kind });
    }
    if s.len() != expected {
        return Err(PhoneError::WrongLength { kind, expected });
    }
    Ok(())
}

/// An 11-digit WhatsApp contact number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WhatsappNumber(String);

impl WhatsappNumber {
    /// Required digit count.
    pub const DIGITS: usize = 11;

    /// Parse a WhatsApp number: exactly 11 ASCII digits, nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error for any other length or for non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        validate_digits(s, "whatsapp number", Self::DIGITS)?;
        Ok(Self(s.to_owned()))
    }

    /// Whether a string would parse as a valid WhatsApp number.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsappNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WhatsappNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A 10-digit local payment-app sender number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SenderPhone(String);

impl SenderPhone {
    /// Required digit count.
    pub const DIGITS: usize = 10;

    /// Parse a sender number: exactly 10 ASCII digits, nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error for any other length or for non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        validate_digits(s, "sender phone", Self::DIGITS)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SenderPhone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_accepts_exactly_eleven_digits() {
        assert!(WhatsappNumber::is_valid("94712345678"));
        assert!(WhatsappNumber::is_valid("00000000000"));
    }

    #[test]
    fn test_whatsapp_rejects_wrong_lengths() {
        assert!(!WhatsappNumber::is_valid("9471234567")); // 10
        assert!(!WhatsappNumber::is_valid("947123456789")); // 12
        assert!(!WhatsappNumber::is_valid(""));
    }

    #[test]
    fn test_whatsapp_rejects_non_digits() {
        assert!(!WhatsappNumber::is_valid("9471234567a"));
        assert!(!WhatsappNumber::is_valid("+9471234567"));
        assert!(!WhatsappNumber::is_valid("94 71234567"));
    }

    #[test]
    fn test_sender_phone_is_ten_digits() {
        assert!(SenderPhone::parse("0771234567").is_ok());
        assert!(SenderPhone::parse("07712345678").is_err()); // 11
        assert!(SenderPhone::parse("077123456").is_err()); // 9
        assert!(SenderPhone::parse("077123456x").is_err());
    }

    #[test]
    fn test_formats_are_distinct() {
        // An 11-digit contact number is not a valid sender phone and vice
        // versa.
        assert!(SenderPhone::parse("94712345678").is_err());
        assert!(!WhatsappNumber::is_valid("0771234567"));
    }
}
