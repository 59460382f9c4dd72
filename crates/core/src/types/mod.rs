//! Core types for Boostline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod phone;
pub mod price;
pub mod status;

pub use credential::CredentialError;
pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{PhoneError, SenderPhone, WhatsappNumber};
pub use price::Price;
pub use status::*;
