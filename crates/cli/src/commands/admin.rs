//! Admin account management.
//!
//! Admin panel access is an account property, not a magic credential: this
//! command creates a regular user record with the admin role, subject to
//! the same uniqueness rules and password hashing as any registration.

use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::info;

use boostline_core::types::credential::{hash_password, validate_password};
use boostline_core::types::{Email, WhatsappNumber};
use boostline_core::user::UserRole;

use crate::commands::open_store;

/// Length of a generated admin password.
const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Create a new admin account.
///
/// # Errors
///
/// Returns an error for malformed input, uniqueness conflicts, or storage
/// failure.
pub async fn create(
    email: &str,
    phone: &str,
    name: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let phone = WhatsappNumber::parse(phone)?;

    let (password, generated) = match password {
        Some(password) => (password, false),
        None => (
            rand::rng()
                .sample_iter(Alphanumeric)
                .take(GENERATED_PASSWORD_LENGTH)
                .map(char::from)
                .collect(),
            true,
        ),
    };
    validate_password(&password)?;
    let password_hash = hash_password(&password)?;

    let store = open_store().await?;
    let user = store
        .users()
        .register(
            email,
            phone,
            password_hash,
            UserRole::Admin,
            Some(name.to_owned()),
        )
        .await?;

    info!("Admin account created");
    info!("  id:    {}", user.id);
    info!("  email: {}", user.email);
    if generated {
        info!("  password (save it now, it is not stored): {password}");
    }

    Ok(())
}
